mod tax_map;

pub use tax_map::TaxMap;
