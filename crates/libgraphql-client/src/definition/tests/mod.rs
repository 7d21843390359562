mod scope_path_tests;
mod source_preprocessor_tests;
