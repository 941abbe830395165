mod job_registry_tests;
mod masking_tests;
mod statement_classifier_tests;
mod submission_tests;
mod support;
