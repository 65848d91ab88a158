pub mod company;
pub mod project;
pub mod purchase_order;
pub mod purchase_order_item;
pub mod purchase_requisition;
pub mod purchase_requisition_item;
pub mod sequence_counter;
pub mod user;
