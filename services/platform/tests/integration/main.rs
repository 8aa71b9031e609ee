
mod account_test;
mod admin_test;
mod catalog_test;
mod principal_test;
mod recommendation_test;
