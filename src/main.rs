#[actix_web::main]
async fn main() -> std::io::Result<()> {
    agri_advisor_lib::run().await
}
