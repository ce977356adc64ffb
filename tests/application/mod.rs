mod course_service_test;
mod prompts_test;
mod social_service_test;
mod speaking_service_test;
