use crate::consts::consts::EntityId;

use super::person::Person;

/// Contacts the in-memory directory starts with unless seeding is turned off
pub fn seed_persons() -> Vec<Person> {
    vec![
        Person {
            id: EntityId("12345".to_string()),
            name: "Maria".to_string(),
            phone: Some("555-1234".to_string()),
            street: "Calle 5 de Mayo".to_string(),
            city: "Ciudad de México".to_string(),
        },
        Person {
            id: EntityId("67890".to_string()),
            name: "Juan".to_string(),
            phone: Some("555-5678".to_string()),
            street: "Avenida del Sol".to_string(),
            city: "Lima".to_string(),
        },
        Person {
            id: EntityId("24680".to_string()),
            name: "Emily".to_string(),
            phone: None,
            street: "Main Street".to_string(),
            city: "Nueva York".to_string(),
        },
    ]
}
