use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::animal::AnimalRow;

pub async fn pets_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<AnimalRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM animals WHERE owner_id = $1 ORDER BY animal_id")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub struct NewPet<'a> {
    pub owner_id: i64,
    pub name: &'a str,
    pub sex: &'a str,
    pub date_of_birth: Option<NaiveDate>,
    pub photo_url: Option<&'a str>,
    pub animal_type: &'a str,
    pub species: &'a str,
    pub breed: Option<&'a str>,
    pub located_name: Option<&'a str>,
}

pub async fn insert_pet(pool: &PgPool, pet: NewPet<'_>) -> Result<AnimalRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO animals
            (owner_id, name, sex, date_of_birth, photo_url, type, species, breed, located_name)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(pet.owner_id)
    .bind(pet.name)
    .bind(pet.sex)
    .bind(pet.date_of_birth)
    .bind(pet.photo_url)
    .bind(pet.animal_type)
    .bind(pet.species)
    .bind(pet.breed)
    .bind(pet.located_name)
    .fetch_one(pool)
    .await
}
