use serde::{Deserialize, Serialize};

use crate::model::person::Person;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhoneFilter {
    /// Only people with a non-empty phone
    Present,
    /// Only people whose phone is missing or empty
    Absent,
}

impl PhoneFilter {
    pub fn matches(&self, person: &Person) -> bool {
        match self {
            PhoneFilter::Present => person.has_phone(),
            PhoneFilter::Absent => !person.has_phone(),
        }
    }
}

#[tracing::instrument(skip(people))]
pub fn filter(people: Vec<Person>, phone_filter: Option<PhoneFilter>) -> Vec<Person> {
    let phone_filter = match phone_filter {
        Some(phone_filter) => phone_filter,
        None => return people,
    };

    people
        .into_iter()
        .filter(|person| phone_filter.matches(person))
        .collect()
}
