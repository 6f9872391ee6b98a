pub mod list;

mod instruction_footer;
mod row_adapter;
mod row_binding;

pub use instruction_footer::InstructionFooter;
pub use list::ShoppingList;
pub use row_adapter::RowAdapter;
pub use row_binding::RowBinding;
