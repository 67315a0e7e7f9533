use std::thread;
use std::time::Duration;

use mockito::{Matcher, Mock, ServerGuard};

use netatmo_zipabox::auth::{Credentials, RawCredentials, TokenManager};
use netatmo_zipabox::data_mgmt::{DispatchOutcome, Dispatcher, MetricKey};
use netatmo_zipabox::interfaces::{GatewayConfig, NetatmoApi, ZipaboxGateway};
use netatmo_zipabox::poller::{CycleOutcome, PollEvent, Poller};

mod stubs;

use stubs::netatmo::{
    gateway_config, stations_data, GATEWAY_PATH, STATIONS_DATA_PATH, TOKEN_PATH, TOKEN_RESPONSE,
};

const TIMEOUT: Duration = Duration::from_secs(5);

fn poller_for(server: &ServerGuard) -> Poller<ZipaboxGateway> {
    let credentials = Credentials::new(RawCredentials {
        grant_type: Some("password".into()),
        username: Some("user@example.com".into()),
        password: Some("hunter2".into()),
        client_id: Some("client".into()),
        client_secret: Some("s3cr3t".into()),
        access_token: None,
    })
    .unwrap();
    let gateway_config: GatewayConfig = gateway_config(&server.url()).parse().unwrap();
    let monitored = gateway_config.monitored_metrics();

    Poller::new(
        NetatmoApi::new(&server.url(), TIMEOUT).unwrap(),
        TokenManager::new(credentials),
        Dispatcher::new(
            ZipaboxGateway::new(gateway_config, TIMEOUT).unwrap(),
            monitored,
        ),
    )
}

fn token_mock(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", TOKEN_PATH)
        .with_header("content-type", "application/json")
        .with_body(TOKEN_RESPONSE)
}

fn stations_mock(server: &mut ServerGuard, temperature: f64, outdoor: f64) -> Mock {
    server
        .mock("POST", STATIONS_DATA_PATH)
        .match_body(Matcher::UrlEncoded("access_token".into(), "abc".into()))
        .with_header("content-type", "application/json")
        .with_body(stations_data(temperature, outdoor))
}

fn full_update_query(temperature: &str, outdoor: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("serial".into(), "SERIAL".into()),
        Matcher::UrlEncoded("apiKey".into(), "KEY".into()),
        Matcher::UrlEncoded("living-temp".into(), temperature.into()),
        Matcher::UrlEncoded("living-pressure".into(), "1013.4".into()),
        Matcher::UrlEncoded("living-noise".into(), "38".into()),
        Matcher::UrlEncoded("living-humidity".into(), "45".into()),
        Matcher::UrlEncoded("living-co2".into(), "512".into()),
        Matcher::UrlEncoded("outdoor-temp".into(), outdoor.into()),
    ])
}

#[test]
fn identical_second_reading_is_not_published() {
    let mut server = mockito::Server::new();
    let token = token_mock(&mut server).expect(1).create();
    let data = stations_mock(&mut server, 18.2, 5.0).expect(2).create();
    let gateway = server
        .mock("GET", GATEWAY_PATH)
        .match_query(full_update_query("18.2", "5"))
        .with_status(200)
        .expect(1)
        .create();

    let mut poller = poller_for(&server);

    let first = poller.tick();
    assert!(matches!(
        first,
        CycleOutcome::Updated {
            dispatch: DispatchOutcome::Published { metrics: 6, changed: 6 },
            ..
        }
    ));
    assert_eq!(
        poller
            .dispatcher()
            .baseline()
            .get(&MetricKey::station("Temperature")),
        Some(18.2)
    );

    let second = poller.tick();
    assert!(matches!(
        second,
        CycleOutcome::Updated {
            dispatch: DispatchOutcome::Unchanged,
            ..
        }
    ));

    token.assert();
    data.assert();
    gateway.assert();
}

#[test]
fn temperature_change_publishes_all_metrics() {
    let mut server = mockito::Server::new();
    let _token = token_mock(&mut server).create();
    let _gateway = server
        .mock("GET", GATEWAY_PATH)
        .match_query(full_update_query("20", "5"))
        .with_status(200)
        .create();

    let mut poller = poller_for(&server);
    let data = stations_mock(&mut server, 20.0, 5.0).create();
    poller.tick();
    data.remove();

    let changed_gateway = server
        .mock("GET", GATEWAY_PATH)
        .match_query(full_update_query("20.5", "5"))
        .with_status(200)
        .expect(1)
        .create();
    let _data = stations_mock(&mut server, 20.5, 5.0).create();

    assert!(matches!(
        poller.tick(),
        CycleOutcome::Updated {
            dispatch: DispatchOutcome::Published { metrics: 6, changed: 1 },
            ..
        }
    ));
    changed_gateway.assert();
}

#[test]
fn rejected_update_is_retried_next_cycle() {
    let mut server = mockito::Server::new();
    let _token = token_mock(&mut server).create();
    let _data = stations_mock(&mut server, 18.2, 5.0).create();
    let failing_gateway = server
        .mock("GET", GATEWAY_PATH)
        .match_query(Matcher::Any)
        .with_status(500)
        .expect(1)
        .create();

    let mut poller = poller_for(&server);
    assert!(matches!(
        poller.tick(),
        CycleOutcome::Updated {
            dispatch: DispatchOutcome::Failed(_),
            ..
        }
    ));
    assert!(poller.dispatcher().baseline().is_empty());
    failing_gateway.assert();
    failing_gateway.remove();

    let gateway = server
        .mock("GET", GATEWAY_PATH)
        .match_query(full_update_query("18.2", "5"))
        .with_status(200)
        .expect(1)
        .create();
    assert!(matches!(
        poller.tick(),
        CycleOutcome::Updated {
            dispatch: DispatchOutcome::Published { .. },
            ..
        }
    ));
    gateway.assert();
}

#[test]
fn running_loop_reuses_token_and_publishes_once() {
    let mut server = mockito::Server::new();
    let token = token_mock(&mut server).expect(1).create();
    let data = stations_mock(&mut server, 18.2, 5.0).expect_at_least(3).create();
    let gateway = server
        .mock("GET", GATEWAY_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .expect(1)
        .create();

    let mut poller = poller_for(&server);
    let events = poller.subscribe();
    let handle = poller.start(Duration::from_millis(10));
    thread::sleep(Duration::from_millis(300));
    handle.stop().unwrap();

    token.assert();
    data.assert();
    gateway.assert();

    let events: Vec<PollEvent> = events.drain().collect();
    assert!(matches!(events[0], PollEvent::TokenAcquired(_)));
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, PollEvent::TokenAcquired(_)))
            .count(),
        1
    );
    assert!(events.len() >= 4);
}

#[test]
fn failing_token_exchange_keeps_loop_alive_without_updates() {
    let mut server = mockito::Server::new();
    let token = server
        .mock("POST", TOKEN_PATH)
        .with_status(500)
        .expect_at_least(3)
        .create();
    let data = server.mock("POST", STATIONS_DATA_PATH).expect(0).create();
    let gateway = server.mock("GET", GATEWAY_PATH).expect(0).create();

    let mut poller = poller_for(&server);
    let events = poller.subscribe();
    let handle = poller.start(Duration::from_millis(10));
    thread::sleep(Duration::from_millis(300));
    let poller = handle.stop().unwrap();

    token.assert();
    data.assert();
    gateway.assert();
    assert!(events.is_empty());
    assert!(!poller.tokens().has_token());
}
