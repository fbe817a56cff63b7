mod api_test;
mod common;
