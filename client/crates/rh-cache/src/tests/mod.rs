mod query_key;
