/*
    Integration tests for core_store subsystem

    Test suite covering:
    - Contract scenarios and error paths
    - Column backfill and schema immutability
    - Round-trips for every supported cell type
    - Concurrent insertion and cell access
    - Property-based checks of the schema and handle invariants
*/
