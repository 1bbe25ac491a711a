// Kept in its own test binary: it mutates the process environment.
use laposte_sdk::config::env;
use laposte_sdk::{ApiClient, HttpSession, SdkConfig, TlsMode};

#[test]
fn environment_overrides_apply_to_clients_built_without_a_base() {
    std::env::set_var(env::LAPOSTE_API_BASE_URL, "https://sandbox.example.com/laposte/");
    std::env::set_var(env::LAPOSTE_API_STRICT_SSL, "false");
    std::env::remove_var(env::DIGIPOSTE_API_BASE_URL);

    let config = SdkConfig::from_env().unwrap();
    let session = HttpSession::configure(None, &config).unwrap();
    assert_eq!(session.tls_mode(), TlsMode::InsecureAcceptAll);

    let laposte = ApiClient::laposte(&config, session.clone()).unwrap();
    assert_eq!(
        laposte.url("suivi/v2/idships/1").unwrap(),
        "https://sandbox.example.com/laposte/suivi/v2/idships/1"
    );

    let digiposte = ApiClient::digiposte(&config, session).unwrap();
    assert_eq!(
        digiposte.base_url().as_str(),
        "https://api.laposte.fr/digiposte/1.0"
    );
}
