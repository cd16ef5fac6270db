//! Seed the database with demo data.
//!
//! Idempotent: users and categories upsert on their unique keys, products
//! are skipped when one with the same name already exists. Running the
//! command twice leaves the database unchanged.

use rust_decimal::Decimal;
use sqlx::PgPool;

use paseo_core::UserRole;

use super::{connect, hash_password};

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price: &'static str,
    images: &'static [&'static str],
    stock: i32,
    sizes: &'static [&'static str],
    category_slug: &'static str,
}

const CATEGORIES: &[(&str, &str, &str)] = &[
    (
        "Deportivos",
        "deportivos",
        "Zapatos deportivos para running, entrenamiento y actividades físicas",
    ),
    ("Casuales", "casuales", "Zapatos casuales para el día a día"),
    (
        "Formales",
        "formales",
        "Zapatos formales para ocasiones especiales",
    ),
    ("Botas", "botas", "Botas para todas las estaciones"),
];

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Zapatillas Running Pro",
        description: "Zapatillas de running de alta calidad con tecnología de amortiguación avanzada. Perfectas para corredores que buscan máximo rendimiento y comodidad.",
        price: "89.99",
        images: &["/products/running-1.jpg", "/products/running-2.jpg"],
        stock: 50,
        sizes: &["38", "39", "40", "41", "42", "43", "44"],
        category_slug: "deportivos",
    },
    SeedProduct {
        name: "Zapatillas Casual Urban",
        description: "Zapatillas casuales con diseño moderno y cómodas para el uso diario. Ideales para caminar por la ciudad.",
        price: "59.99",
        images: &["/products/casual-1.jpg", "/products/casual-2.jpg"],
        stock: 75,
        sizes: &["36", "37", "38", "39", "40", "41", "42", "43"],
        category_slug: "casuales",
    },
    SeedProduct {
        name: "Zapatos Oxford Clásicos",
        description: "Zapatos formales de cuero genuino con estilo clásico. Perfectos para ocasiones formales y de negocios.",
        price: "129.99",
        images: &["/products/formal-1.jpg", "/products/formal-2.jpg"],
        stock: 30,
        sizes: &["39", "40", "41", "42", "43", "44", "45"],
        category_slug: "formales",
    },
    SeedProduct {
        name: "Botas de Cuero Marrón",
        description: "Botas elegantes de cuero marrón con suela antideslizante. Ideales para el otoño e invierno.",
        price: "149.99",
        images: &["/products/botas-1.jpg", "/products/botas-2.jpg"],
        stock: 25,
        sizes: &["39", "40", "41", "42", "43", "44"],
        category_slug: "botas",
    },
    SeedProduct {
        name: "Zapatillas Deportivas Air",
        description: "Zapatillas deportivas con tecnología de aire para máxima comodidad. Perfectas para entrenamientos intensos.",
        price: "99.99",
        images: &["/products/sport-1.jpg", "/products/sport-2.jpg"],
        stock: 60,
        sizes: &["38", "39", "40", "41", "42", "43", "44", "45"],
        category_slug: "deportivos",
    },
    SeedProduct {
        name: "Zapatos Derby Negros",
        description: "Zapatos Derby de cuero negro con acabado brillante. Elegantes y versátiles para cualquier ocasión formal.",
        price: "119.99",
        images: &["/products/derby-1.jpg", "/products/derby-2.jpg"],
        stock: 40,
        sizes: &["39", "40", "41", "42", "43", "44"],
        category_slug: "formales",
    },
];

/// Seed demo users, categories, and products.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect().await?;

    seed_user(&pool, "admin@example.com", "admin123", "Administrador", UserRole::Admin).await?;
    seed_user(&pool, "user@example.com", "user123", "Usuario de Prueba", UserRole::User).await?;
    tracing::info!("users seeded: admin@example.com / user@example.com");

    for (name, slug, description) in CATEGORIES {
        sqlx::query(
            r"
            INSERT INTO categories (name, slug, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (slug) DO NOTHING
            ",
        )
        .bind(name)
        .bind(slug)
        .bind(description)
        .execute(&pool)
        .await?;
    }
    tracing::info!(count = CATEGORIES.len(), "categories seeded");

    let mut created = 0;
    for product in PRODUCTS {
        if seed_product(&pool, product).await? {
            created += 1;
        }
    }
    tracing::info!(created, total = PRODUCTS.len(), "products seeded");

    Ok(())
}

async fn seed_user(
    pool: &PgPool,
    email: &str,
    password: &str,
    name: &str,
    role: UserRole,
) -> Result<(), Box<dyn std::error::Error>> {
    let password_hash = hash_password(password)?;

    sqlx::query(
        r"
        INSERT INTO users (email, password_hash, name, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO NOTHING
        ",
    )
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .bind(role)
    .execute(pool)
    .await?;

    Ok(())
}

async fn seed_product(
    pool: &PgPool,
    product: &SeedProduct,
) -> Result<bool, Box<dyn std::error::Error>> {
    let exists =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE name = $1")
            .bind(product.name)
            .fetch_one(pool)
            .await?;
    if exists > 0 {
        return Ok(false);
    }

    let category_id = sqlx::query_scalar::<_, i64>("SELECT id FROM categories WHERE slug = $1")
        .bind(product.category_slug)
        .fetch_one(pool)
        .await?;

    let price: Decimal = product.price.parse()?;
    let images: Vec<String> = product.images.iter().map(ToString::to_string).collect();
    let sizes: Vec<String> = product.sizes.iter().map(ToString::to_string).collect();

    sqlx::query(
        r"
        INSERT INTO products (name, description, price, images, stock, sizes, category_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ",
    )
    .bind(product.name)
    .bind(product.description)
    .bind(price)
    .bind(images)
    .bind(product.stock)
    .bind(sizes)
    .bind(category_id)
    .execute(pool)
    .await?;

    Ok(true)
}
