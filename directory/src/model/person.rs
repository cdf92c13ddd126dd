use serde::{Deserialize, Serialize};

use crate::consts::consts::EntityId;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Person {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub street: String,
    pub city: String,
}

/// Read-only projection of where a person lives, never stored on its own
#[derive(Clone, Debug, PartialEq)]
pub struct Address {
    pub street: String,
    pub city: String,
}

impl Person {
    pub fn new(name: String, phone: Option<String>, street: String, city: String) -> Self {
        Person {
            id: EntityId::new(),
            name,
            phone,
            street,
            city,
        }
    }

    pub fn address(&self) -> Address {
        Address {
            street: self.street.clone(),
            city: self.city.clone(),
        }
    }

    /// An empty phone counts as no phone
    pub fn has_phone(&self) -> bool {
        matches!(&self.phone, Some(phone) if !phone.is_empty())
    }

    pub fn new_test() -> Self {
        Person {
            id: EntityId("1".to_string()),
            name: "Name".to_string(),
            phone: Some("Phone".to_string()),
            street: "Street".to_string(),
            city: "City".to_string(),
        }
    }
}

/// Fields supplied by a caller creating a person, the id is assigned on insert
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewPerson {
    pub name: String,
    pub phone: Option<String>,
    pub street: String,
    pub city: String,
}

impl NewPerson {
    pub fn into_person(self) -> Person {
        Person::new(self.name, self.phone, self.street, self.city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_is_projected_from_person() {
        let person = Person::new_test();

        assert_eq!(
            person.address(),
            Address {
                street: "Street".to_string(),
                city: "City".to_string(),
            }
        );
    }

    #[test]
    fn empty_phone_is_treated_as_absent() {
        let mut person = Person::new_test();
        assert!(person.has_phone());

        person.phone = Some(String::new());
        assert!(!person.has_phone());

        person.phone = None;
        assert!(!person.has_phone());
    }

    #[test]
    fn new_people_get_distinct_ids() {
        let new_person = NewPerson {
            name: "Name".to_string(),
            phone: None,
            street: "Street".to_string(),
            city: "City".to_string(),
        };

        let first = new_person.clone().into_person();
        let second = new_person.into_person();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn absent_phone_is_not_serialized() {
        let mut person = Person::new_test();
        person.phone = None;

        let json = serde_json::to_value(&person).expect("should serialize");

        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "name": "Name",
                "street": "Street",
                "city": "City",
            })
        );
    }
}
