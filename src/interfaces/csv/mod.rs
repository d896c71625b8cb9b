pub mod intent_reader;
pub mod order_writer;
