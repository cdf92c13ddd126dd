use serde::{Deserialize, Serialize};

use crate::{
    consts::consts::EntityId,
    table::{filter::PhoneFilter, row::UpdatePersonData},
};

use super::person::Person;

/// A single directory operation expressed as data, see [`crate::table::table::PersonTable::apply`]
#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum Statement {
    /// Returns the number of people held
    Count,
    /// Returns a list of Person, all of them when no filter is given
    List(Option<PhoneFilter>),
    /// Returns the first person with exactly this name, if any
    FindByName(String),
    Add(Person),
    /// Removes the first person with exactly this name, if any
    RemoveByName(String),
    Update(EntityId, UpdatePersonData),
}

impl Statement {
    pub fn is_query(&self) -> bool {
        !self.is_mutation()
    }

    pub fn is_mutation(&self) -> bool {
        match self {
            Statement::Add(_) | Statement::RemoveByName(_) | Statement::Update(_, _) => true,
            Statement::Count | Statement::List(_) | Statement::FindByName(_) => false,
        }
    }
}

// Each statement maps to exactly one result variant:
//  - Count -> Count
//  - List -> List
//  - FindByName, RemoveByName -> GetSingle
//  - Add, Update -> Single
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum StatementResult {
    Count(usize),
    Single(Person),
    GetSingle(Option<Person>),
    List(Vec<Person>),
}

impl StatementResult {
    pub fn count(self) -> usize {
        if let StatementResult::Count(c) = self {
            c
        } else {
            panic!("Statement result is not of type Count")
        }
    }

    pub fn single(self) -> Person {
        if let StatementResult::Single(p) = self {
            p
        } else {
            panic!("Statement result is not of type Single")
        }
    }

    pub fn get_single(self) -> Option<Person> {
        if let StatementResult::GetSingle(p) = self {
            p
        } else {
            panic!("Statement result is not of type GetSingle")
        }
    }

    pub fn list(self) -> Vec<Person> {
        if let StatementResult::List(l) = self {
            l
        } else {
            panic!("Statement result is not of type List")
        }
    }
}
