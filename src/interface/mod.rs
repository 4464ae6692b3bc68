pub mod export;
pub mod prompts;
pub mod render;
pub mod script;

pub use export::write_order_csv;
pub use prompts::prompt_yes_no;
pub use render::{
    beverage_line, display_findings, display_portion_table, display_recommendations, pizza_line,
};
pub use script::order_script;
