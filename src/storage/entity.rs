//! Address record entity
//!
//! One row per address. `name`, `latitude` and `longitude` are indexed;
//! the latter two serve the nearby-search scan.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub name: String,
    pub street: String,
    pub city: String,
    #[sea_orm(indexed)]
    pub latitude: f64,
    #[sea_orm(indexed)]
    pub longitude: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
