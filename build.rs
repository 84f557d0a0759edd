use std::{env, fs};

fn main() {
    // Endpoints and WiFi credentials are baked in at build time; see
    // `NodeConfig::default()`.
    for (key, fallback) in [
        ("COLLECTOR_URL", "http://127.0.0.1:3000/api/sensors"),
        ("COMMAND_URL", "http://127.0.0.1:3000/api/logs/control/latest"),
        ("WIFI_SSID", "internet"),
        ("WIFI_PASS", "password"),
    ] {
        println!("cargo:rerun-if-env-changed={key}");
        let value = env::var(key).unwrap_or_else(|_| fallback.into());
        println!("cargo:rustc-env=AIRNODE_{key}={value}");
    }

    // Optional JSON config override, see `NodeConfig::load()`.  Raw
    // newlines cannot occur inside JSON strings, so folding them is safe.
    println!("cargo:rerun-if-env-changed=CONFIG_JSON");
    if let Ok(path) = env::var("CONFIG_JSON") {
        println!("cargo:rerun-if-changed={path}");
        let doc = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("cannot read CONFIG_JSON `{path}`: {e}"));
        println!("cargo:rustc-env=AIRNODE_CONFIG_JSON={}", doc.replace(['\r', '\n'], " "));
    }

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
