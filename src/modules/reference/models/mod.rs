mod profiles;

pub use profiles::{
    validate_ncm, validate_uf, IcmsProfile, NcmTaxProfile, OperationType, PisCofinsRegime,
};
