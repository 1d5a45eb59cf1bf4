use sea_orm::entity::prelude::*;

pub mod users {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub first_name: String,
        pub last_name: String,
        pub date_of_birth: Date,
        pub city: String,
        pub street_name: String,
        pub street_address: String,
        pub zip_code: String,
        pub state: String,
        pub country: String,
        #[sea_orm(column_type = "Double")]
        pub latitude: f64,
        #[sea_orm(column_type = "Double")]
        pub longitude: f64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
