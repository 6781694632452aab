use serde::Deserialize;
use validator::Validate;

use crate::repositories::company_repository::{CompanyChanges, NewCompany};
use crate::utils::errors::AppResult;
use crate::utils::field::Field;
use crate::utils::money::Money;
use crate::utils::validation::validate_not_empty;

// Request to create a company
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(custom = "validate_not_empty", length(max = 150))]
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub localcharge: Option<Money>,
    pub outstationcharge: Option<Money>,
    pub lumpsumcharge: Option<Money>,
    pub localdist: Option<Money>,
    pub outstationdistance: Option<Money>,
}

impl CreateCompanyRequest {
    pub fn into_new_company(self) -> AppResult<NewCompany> {
        for (name, value) in [
            ("localcharge", self.localcharge),
            ("outstationcharge", self.outstationcharge),
            ("lumpsumcharge", self.lumpsumcharge),
            ("localdist", self.localdist),
            ("outstationdistance", self.outstationdistance),
        ] {
            Money::check_non_negative(name, value.as_ref())?;
        }

        Ok(NewCompany {
            name: self.name,
            address: self.address,
            phone: self.phone,
            email: self.email,
            localcharge: self.localcharge,
            outstationcharge: self.outstationcharge,
            lumpsumcharge: self.lumpsumcharge,
            localdist: self.localdist,
            outstationdistance: self.outstationdistance,
        })
    }
}

// Request to update a company
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    #[validate(custom = "validate_not_empty", length(max = 150))]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Field<String>,
    #[serde(default)]
    pub phone: Field<String>,
    #[serde(default)]
    pub email: Field<String>,
    #[serde(default)]
    pub localcharge: Field<Money>,
    #[serde(default)]
    pub outstationcharge: Field<Money>,
    #[serde(default)]
    pub lumpsumcharge: Field<Money>,
    #[serde(default)]
    pub localdist: Field<Money>,
    #[serde(default)]
    pub outstationdistance: Field<Money>,
}

impl UpdateCompanyRequest {
    pub fn into_changes(self) -> AppResult<CompanyChanges> {
        for (name, value) in [
            ("localcharge", &self.localcharge),
            ("outstationcharge", &self.outstationcharge),
            ("lumpsumcharge", &self.lumpsumcharge),
            ("localdist", &self.localdist),
            ("outstationdistance", &self.outstationdistance),
        ] {
            Money::check_non_negative(name, value.value())?;
        }

        Ok(CompanyChanges {
            name: self.name,
            address: self.address,
            phone: self.phone,
            email: self.email,
            localcharge: self.localcharge,
            outstationcharge: self.outstationcharge,
            lumpsumcharge: self.lumpsumcharge,
            localdist: self.localdist,
            outstationdistance: self.outstationdistance,
        })
    }
}
