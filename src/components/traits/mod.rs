pub mod managed_item;
