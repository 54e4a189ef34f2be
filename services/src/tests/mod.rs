mod privacy_tests;
