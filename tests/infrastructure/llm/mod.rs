mod openai_error_test;
