#[actix_web::main]
async fn main() -> std::io::Result<()> {
    docugenius_lib::run().await
}
