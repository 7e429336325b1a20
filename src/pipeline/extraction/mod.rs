pub mod text_attributes;

pub use text_attributes::{
    extract_additional_info, extract_location, extract_metadata, extract_museum_name, extract_year,
};
