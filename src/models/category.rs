use diesel::prelude::*;

use crate::domain::category::{Category as DomainCategory, NewCategory as DomainNewCategory};
use crate::domain::types::{CategoryTitle, TypeConstraintError};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub title: String,
}

/// Insertable/patchable form of [`Category`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub title: String,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: category.id.try_into()?,
            title: CategoryTitle::new(category.title)?,
        })
    }
}

impl From<DomainNewCategory> for NewCategory {
    fn from(category: DomainNewCategory) -> Self {
        Self {
            title: category.title.into_inner(),
        }
    }
}

impl From<&DomainCategory> for NewCategory {
    fn from(category: &DomainCategory) -> Self {
        Self {
            title: category.title.as_str().to_string(),
        }
    }
}
