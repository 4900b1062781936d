pub mod worker_handler;
