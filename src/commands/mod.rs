pub mod facts;

pub use facts::handle_facts_command;
