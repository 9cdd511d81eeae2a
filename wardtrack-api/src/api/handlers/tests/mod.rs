// Handler tests against mock services
mod patients_test;
mod test_records_test;
