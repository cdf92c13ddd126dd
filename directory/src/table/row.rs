use serde::{Deserialize, Serialize};

use crate::model::person::Person;

use super::table::ApplyErrors;

#[derive(Debug)]
pub struct ApplyUpdateResult {
    pub previous: Person,
    pub current: Person,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum UpdateStatement {
    Set(String),
    Unset,
    NoChanges,
}

/// Per-field changes applied to an existing person. `name`, `street` and `city` are required
/// fields and refuse `Unset`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UpdatePersonData {
    pub name: UpdateStatement,
    pub phone: UpdateStatement,
    pub street: UpdateStatement,
    pub city: UpdateStatement,
}

impl UpdatePersonData {
    /// Replaces the required fields and applies `phone` as given
    pub fn replace(name: String, street: String, city: String, phone: UpdateStatement) -> Self {
        UpdatePersonData {
            name: UpdateStatement::Set(name),
            phone,
            street: UpdateStatement::Set(street),
            city: UpdateStatement::Set(city),
        }
    }

    pub fn no_changes() -> Self {
        UpdatePersonData {
            name: UpdateStatement::NoChanges,
            phone: UpdateStatement::NoChanges,
            street: UpdateStatement::NoChanges,
            city: UpdateStatement::NoChanges,
        }
    }

    /// Verifies every field before changing anything, so a failed update leaves `person` as it was
    pub fn apply(&self, person: &mut Person) -> Result<ApplyUpdateResult, ApplyErrors> {
        let previous = person.clone();
        let mut current = person.clone();

        apply_required("name", &self.name, &mut current.name)?;
        apply_required("street", &self.street, &mut current.street)?;
        apply_required("city", &self.city, &mut current.city)?;

        match &self.phone {
            UpdateStatement::Set(phone) => current.phone = Some(phone.clone()),
            UpdateStatement::Unset => current.phone = None,
            UpdateStatement::NoChanges => {}
        }

        *person = current.clone();

        Ok(ApplyUpdateResult { previous, current })
    }
}

fn apply_required(
    field: &str,
    update: &UpdateStatement,
    value: &mut String,
) -> Result<(), ApplyErrors> {
    match update {
        UpdateStatement::Set(new_value) => *value = new_value.clone(),
        UpdateStatement::Unset => {
            return Err(ApplyErrors::NotNullConstraintViolation(field.to_string()))
        }
        UpdateStatement::NoChanges => {}
    }

    Ok(())
}
