mod common;
mod system_store_tests;
