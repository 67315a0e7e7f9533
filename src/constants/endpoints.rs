pub const TOKEN: &str = "/oauth2/token";
pub const STATIONS_DATA: &str = "/api/getstationsdata";
