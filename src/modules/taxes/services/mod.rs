mod rates;

pub use rates::TaxRates;
