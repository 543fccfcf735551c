mod connection_registry_test;
