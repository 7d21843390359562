mod fragment_resolver_tests;
mod printer_tests;
