// lib/src/storage_engine/pharmacy.rs

use models::medical::{Medicine, NewMedicine, NewOrder};
use tracing::info;

use crate::database::Database;
use crate::errors::Result;

impl Database {
    pub async fn list_medicines(&self) -> Result<Vec<Medicine>> {
        Ok(sqlx::query_as::<_, Medicine>(
            "SELECT medicine_id, name, stock, expiry_date, category, description, price \
             FROM medicines ORDER BY medicine_id",
        )
        .fetch_all(self.pool())
        .await?)
    }

    /// Returns the new `medicine_id`.
    pub async fn add_medicine(&self, medicine: &NewMedicine) -> Result<i64> {
        let medicine_id: i64 = sqlx::query_scalar(
            "INSERT INTO medicines (name, category, description, stock, price, expiry_date) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING medicine_id",
        )
        .bind(&medicine.name)
        .bind(&medicine.category)
        .bind(&medicine.description)
        .bind(medicine.stock)
        .bind(medicine.price)
        .bind(&medicine.expiry_date)
        .fetch_one(self.pool())
        .await?;
        info!("Added medicine {} ({})", medicine_id, medicine.name);
        Ok(medicine_id)
    }

    pub async fn update_medicine_stock(&self, medicine_id: i64, stock: i64) -> Result<u64> {
        let result = sqlx::query("UPDATE medicines SET stock = ?1 WHERE medicine_id = ?2")
            .bind(stock)
            .bind(medicine_id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_medicine(&self, medicine_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM medicines WHERE medicine_id = ?1")
            .bind(medicine_id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }

    /// Records an order total. Stock is not reserved or decremented.
    pub async fn place_order(&self, order: &NewOrder) -> Result<i64> {
        let order_id: i64 = sqlx::query_scalar(
            "INSERT INTO orders (order_date, patient_id, cost) VALUES (?1, ?2, ?3) RETURNING order_id",
        )
        .bind(&order.order_date)
        .bind(&order.patient_id)
        .bind(order.cost)
        .fetch_one(self.pool())
        .await?;
        info!("Placed order {} for patient {}", order_id, order.patient_id);
        Ok(order_id)
    }
}
