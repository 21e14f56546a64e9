pub mod due_mapper;
pub mod payment_mapper;
