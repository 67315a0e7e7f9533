#![allow(dead_code)]
// Not every test binary uses every fixture

pub const TOKEN_PATH: &str = "/oauth2/token";
pub const STATIONS_DATA_PATH: &str = "/api/getstationsdata";
pub const GATEWAY_PATH: &str = "/zipato-web/remoting/attribute/set";

pub const TOKEN_RESPONSE: &str = r#"{"access_token": "abc", "refresh_token": "def"}"#;

pub fn stations_data(temperature: f64, outdoor_temperature: f64) -> String {
    format!(
        r#"
    {{
        "body": {{
            "devices": [
                {{
                    "_id": "70:ee:50:00:00:01",
                    "station_name": "Home",
                    "module_name": "Living Room",
                    "dashboard_data": {{
                        "time_utc": 1500000000,
                        "Temperature": {temperature},
                        "CO2": 512,
                        "Humidity": 45,
                        "Noise": 38,
                        "Pressure": 1013.4,
                        "temp_trend": "stable",
                        "pressure_trend": "up"
                    }},
                    "modules": [
                        {{
                            "_id": "02:00:00:00:00:01",
                            "module_name": "Outdoor",
                            "dashboard_data": {{
                                "time_utc": 1500000000,
                                "Temperature": {outdoor_temperature},
                                "Humidity": 81
                            }}
                        }}
                    ]
                }}
            ]
        }},
        "status": "ok"
    }}
    "#
    )
}

pub fn gateway_config(base_url: &str) -> String {
    format!(
        r#"
    {{
        "baseurl": "{base_url}{GATEWAY_PATH}?serial=SERIAL&apiKey=KEY",
        "station": {{
            "Temperature": "living-temp",
            "Pressure": "living-pressure",
            "Noise": "living-noise",
            "Humidity": "living-humidity",
            "CO2": "living-co2"
        }},
        "modules": {{
            "Outdoor": {{"Temperature": "outdoor-temp"}}
        }}
    }}
    "#
    )
}
