use super::traits::RatingStore;
use super::types::{Dish, NewDish};
use crate::error::StoreError;

/// The dishes the app ships with for demos and local development.
pub fn sample_dishes() -> Vec<NewDish> {
    vec![
        NewDish {
            name: "Truffle Pasta".into(),
            restaurant: "La Pasta House".into(),
            price: "$24.99".into(),
            image_url: "https://images.unsplash.com/photo-1473093295043-cdd812d0e601".into(),
            tags: vec!["Italian".into(), "Pasta".into(), "Vegetarian".into()],
        },
        NewDish {
            name: "Wagyu Burger".into(),
            restaurant: "Gourmet Burgers".into(),
            price: "$32.99".into(),
            image_url: "https://images.unsplash.com/photo-1568901346375-23c9450c58cd".into(),
            tags: vec!["American".into(), "Burger".into(), "Premium".into()],
        },
    ]
}

/// Insert every sample dish not already present (matched on name and
/// restaurant). Returns the sample dishes as stored, in sample order.
pub async fn seed_sample_dishes(store: &dyn RatingStore) -> Result<Vec<Dish>, StoreError> {
    let existing = store.fetch_dishes().await?;
    let mut seeded = Vec::new();

    for sample in sample_dishes() {
        let found = existing
            .iter()
            .find(|dish| dish.name == sample.name && dish.restaurant == sample.restaurant);
        let dish = match found {
            Some(dish) => dish.clone(),
            None => {
                let dish = store.insert_dish(sample).await?;
                tracing::info!(dish_id = %dish.id, name = %dish.name, "dish.seeded");
                dish
            }
        };
        seeded.push(dish);
    }
    Ok(seeded)
}
