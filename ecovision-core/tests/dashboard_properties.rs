use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use ecovision_core::{
    chat::{ChatSession, CompletionClient, FALLBACK_REPLY},
    dashboard::DashboardBuilder,
    error::ChatError,
    evaluation::evaluate,
    export::{format_series, parse_sections},
    generation::{generate_air, generate_noise, generate_soil, generate_water},
};
use ecovision_schemas::{
    chat::{ChatTurn, Role},
    city::City,
    record::{AirRecord, MetricRecord, SoilRecord, WaterRecord},
    selection::{Category, Window},
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, 30)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .unwrap()
}

fn current_hour() -> NaiveDateTime {
    now().with_minute(0).and_then(|t| t.with_second(0)).unwrap()
}

fn assert_hourly<R: MetricRecord>(records: &[R], hours: usize) {
    assert_eq!(records.len(), hours);
    assert_eq!(records.last().map(|r| r.timestamp()), Some(current_hour()));
    for pair in records.windows(2) {
        assert_eq!(pair[1].timestamp() - pair[0].timestamp(), Duration::hours(1));
    }
}

#[test]
fn every_generator_fills_the_window() {
    let mut rng = StdRng::seed_from_u64(2024);
    let cities = [City::Bangalore, City::Delhi, City::Mumbai, City::from("Other")];
    for window in Window::ALL {
        for city in &cities {
            assert_hourly(generate_air(city, window, now(), &mut rng).records(), window.hours());
            assert_hourly(generate_water(city, window, now(), &mut rng).records(), window.hours());
            assert_hourly(generate_soil(city, window, now(), &mut rng).records(), window.hours());
            assert_hourly(generate_noise(city, window, now(), &mut rng).records(), window.hours());
        }
    }
}

#[test]
fn generated_records_respect_declared_floors() {
    let mut rng = StdRng::seed_from_u64(77);
    for _ in 0..25 {
        let air = generate_air(&City::Delhi, Window::ThreeDays, now(), &mut rng);
        for r in air.records() {
            assert!(r.pm25 >= 5 && r.pm10 >= 10 && r.co >= 0.1 && r.aqi <= 500);
            assert_eq!((r.co * 100.0).round() / 100.0, r.co);
        }
        let water = generate_water(&City::Mumbai, Window::ThreeDays, now(), &mut rng);
        for r in water.records() {
            assert!(r.tds_mg_per_l >= 50 && r.turbidity_ntu >= 0.5 && r.do_mg_per_l >= 2.0);
        }
        let soil = generate_soil(&City::Mumbai, Window::Day, now(), &mut rng);
        for r in soil.records() {
            assert!(r.pesticides_ppm >= 0.0);
        }
    }
}

#[test]
fn documented_threshold_examples() {
    let air = AirRecord {
        timestamp: current_hour(),
        pm25: 200,
        pm10: 50,
        co: 1.0,
        no2: 60,
        so2: 10,
        o3: 50,
        aqi: 100,
    };
    assert_eq!(evaluate(&air).messages(), vec!["PM2.5 unhealthy"]);
    assert_eq!(evaluate(&air), evaluate(&air.clone()));

    let water = WaterRecord {
        timestamp: current_hour(),
        ph: 9.0,
        tds_mg_per_l: 500,
        turbidity_ntu: 1.0,
        do_mg_per_l: 7.0,
        nitrates_mg_per_l: 1.0,
        lead_ppb: 5.0,
    };
    assert_eq!(evaluate(&water).messages(), vec!["pH out of safe range"]);
}

#[test]
fn export_round_trip_preserves_shape() {
    let mut rng = StdRng::seed_from_u64(5);
    for window in Window::ALL {
        let soil = generate_soil(&City::Bangalore, window, now(), &mut rng);
        let sections = parse_sections(&format_series(&soil).unwrap()).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].rows, soil.len());
        assert_eq!(sections[0].fields, SoilRecord::header());
    }
}

#[test]
fn snapshot_for_all_categories_is_fully_populated() {
    let snapshot = DashboardBuilder::new()
        .with_city(City::Delhi)
        .with_category(Category::All)
        .with_window(Window::TwoDays)
        .with_reference_time(now())
        .build()
        .unwrap()
        .run(&mut StdRng::seed_from_u64(1));

    assert!(snapshot.air.is_some() && snapshot.water.is_some());
    assert!(snapshot.soil.is_some() && snapshot.noise.is_some());
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["window"], 48);
    assert_eq!(json["category"], "all");
    assert_eq!(json["air"]["series"]["records"].as_array().map(Vec::len), Some(48));
}

struct Offline;

impl CompletionClient for Offline {
    fn complete(&self, _messages: &[ChatTurn]) -> Result<String, ChatError> {
        Err(ChatError::Upstream {
            status: 503,
            message: "unavailable".to_string(),
        })
    }
}

#[test]
fn chat_failures_stay_inside_the_session() {
    let mut session = ChatSession::new("You are an expert environmental assistant.");
    session.submit(&Offline, "What is a safe AQI?");
    session.submit(&Offline, "Why?");

    let roles: Vec<Role> = session.transcript().iter().map(|t| t.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User, Role::Assistant]);
    assert!(session
        .transcript()
        .iter()
        .filter(|t| t.role == Role::Assistant)
        .all(|t| t.content == FALLBACK_REPLY));
}
