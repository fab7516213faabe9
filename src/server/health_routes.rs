use rocket::get;

#[get("/start")]
pub fn start() -> &'static str {
    "OK!"
}

#[get("/stop")]
pub fn stop() -> &'static str {
    "OK!"
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK!"
}
