//! Plain-language forecast for the best route.
//!
//! # Sentence plan
//!
//! 1. current conditions, from the offset-0 bucket color;
//! 2. the expected change by departure (only when leaving later);
//! 3. weather;
//! 4. why the recommended route holds up.
//!
//! Each sentence is drawn from a fixed pool with
//! `pool[(seed + k) % len]`, where `seed = hour × 100 + minute + departure`
//! of the query time and `k` is fixed per sentence kind.  The same moment
//! and departure always give the same paragraph.

use serde::Serialize;

use tc_core::{DepartureTime, SeverityColor, Weather, WeatherTier};
use tc_traffic::{time_factor, transition_multiplier};

use crate::RankedRoute;

const NOW_CLEAR: &[&str] = &[
    "Traffic is moving freely with no real delays right now.",
    "The roads are open and flowing well at the moment.",
    "Right now vehicles are moving without holdups.",
    "Current traffic is light across the network.",
];

const NOW_MODERATE: &[&str] = &[
    "There is moderate congestion on some roads right now.",
    "Traffic is busy at the moment, with slowdowns here and there.",
    "Several stretches are running slower than usual.",
    "The network is fairly busy, causing minor delays.",
];

const NOW_HEAVY: &[&str] = &[
    "Heavy congestion is affecting most routes right now.",
    "Traffic is very slow at the moment, so expect real delays.",
    "Conditions are difficult, with heavy traffic on key roads.",
    "Congestion across the network is causing long delays.",
];

const LATER_PEAK: &[&str] = &[
    "Rush hour will be in full swing by the time you leave.",
    "Expect peak congestion at your departure time.",
    "Traffic will be at its heaviest when you set off.",
    "Your departure falls in the worst of the peak.",
];

const LATER_BUILDING: &[&str] = &[
    "Congestion is likely to build quickly as rush hour starts.",
    "Traffic should get heavier as the commute picks up.",
    "Delays will grow as peak traffic ramps up.",
    "Rush hour is close, so congestion will rise.",
];

const LATER_EASING: &[&str] = &[
    "Traffic should ease noticeably before you leave.",
    "Conditions are expected to improve by your departure.",
    "Congestion should thin out as the peak winds down.",
    "The roads should be clearing by the time you go.",
];

const LATER_STEADY_CLEAR: &[&str] = &[
    "No big change is expected, and roads should stay clear.",
    "Traffic is forecast to remain light.",
    "Conditions should hold steady until you leave.",
    "The roads are expected to keep flowing freely.",
];

const LATER_STEADY_BUSY: &[&str] = &[
    "Conditions should stay about where they are now.",
    "Moderate traffic is likely to continue.",
    "Expect roughly the same traffic levels when you leave.",
    "Neither a clear improvement nor a slowdown is expected.",
];

const WEATHER_WET_NOW: &[&str] = &[
    "Rain is slowing traffic, especially on narrower roads.",
    "Wet roads are cutting speeds across the network.",
    "Rainfall is affecting driving conditions on local streets.",
];

const WEATHER_WET_LATER: &[&str] = &[
    "Rain is expected around your departure, which may slow things further.",
    "Allow extra time, as wet conditions are likely when you leave.",
    "Expect wet roads at departure, with narrow streets hit hardest.",
];

const WEATHER_STORM: &[&str] = &[
    "A storm is slowing every route, so allow plenty of extra time.",
    "Severe weather is causing major delays across the network.",
    "Storm conditions are disrupting travel on all roads.",
];

const WEATHER_FAIR: &[&str] = &[
    "The weather is fine and is not adding to travel times.",
    "Dry conditions mean no weather delays on any route.",
    "Good weather is keeping traffic moving normally.",
];

const WHY_BEST: &[&str] = &[
    "This route keeps to major roads that cope better with congestion.",
    "It stays on wider roads that are less affected by peak traffic.",
    "Its main arterials make it less sensitive to traffic build-up.",
    "It is the strongest option for current and forecast conditions.",
];

const WHY_IMPROVING: &[&str] = &[
    "conditions on it are expected to improve by the time you leave.",
    "it is trending towards lighter traffic at your departure.",
    "it gains the most from the expected easing of traffic.",
];

const WHY_WORSENING: &[&str] = &[
    "even with rising congestion it stays the quickest option.",
    "it still performs best despite the expected slowdown.",
    "the alternatives are expected to worsen more than this one.",
];

/// Direction of congestion between now and departure.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Worsening,
    Stable,
}

fn pick(pool: &[&'static str], seed: u64) -> &'static str {
    pool[(seed % pool.len() as u64) as usize]
}

/// Bucket offset that best represents a departure `departure_minutes` from
/// now: 0–7 → 0, 8–22 → 15, later → 30.
pub fn bucket_for_departure(departure_minutes: i64) -> i64 {
    match departure_minutes {
        ..=7 => 0,
        8..=22 => 15,
        _ => 30,
    }
}

fn now_color(route: &RankedRoute) -> SeverityColor {
    route.prediction(0).map_or(SeverityColor::Clear, |b| b.color)
}

fn future_color(route: &RankedRoute, departure_minutes: i64) -> SeverityColor {
    route
        .prediction(bucket_for_departure(departure_minutes))
        .map_or_else(|| now_color(route), |b| b.color)
}

/// Compare the route's color now with its color at departure.
pub fn detect_trend(route: &RankedRoute, departure_minutes: i64) -> Trend {
    let now = now_color(route).rank();
    let later = future_color(route, departure_minutes).rank();
    match later.cmp(&now) {
        std::cmp::Ordering::Less    => Trend::Improving,
        std::cmp::Ordering::Greater => Trend::Worsening,
        std::cmp::Ordering::Equal   => Trend::Stable,
    }
}

/// Forecast paragraph for `top`, queried at `now` for a departure
/// `departure_minutes` later.  Empty without a route.
pub fn narrate(
    top:               Option<&RankedRoute>,
    departure_minutes: i64,
    weather:           Option<&Weather>,
    now:               DepartureTime,
) -> String {
    let Some(route) = top else {
        return String::new();
    };
    let departure = departure_minutes.max(0);
    let seed = now.hour() as u64 * 100 + now.minute() as u64 + departure as u64;

    let mut sentences: Vec<&str> = Vec::with_capacity(4);

    sentences.push(match now_color(route) {
        SeverityColor::Heavy    => pick(NOW_HEAVY, seed),
        SeverityColor::Moderate => pick(NOW_MODERATE, seed),
        SeverityColor::Clear | SeverityColor::Neutral => pick(NOW_CLEAR, seed),
    });

    if departure > 0 {
        sentences.push(change_sentence(route, departure, now, seed));
    }

    sentences.push(weather_sentence(weather, departure, seed + 6));

    let mut paragraph = sentences.join(" ");

    match (&route.corridor_route, departure) {
        (Some(name), d) if d > 0 => {
            let why = match detect_trend(route, departure) {
                Trend::Improving => pick(WHY_IMPROVING, seed + 7),
                Trend::Worsening => pick(WHY_WORSENING, seed + 8),
                Trend::Stable    => pick(WHY_BEST, seed + 9),
            };
            paragraph.push_str(&format!(" The recommended route {name}: {why}"));
        }
        (_, 0) => {
            paragraph.push(' ');
            paragraph.push_str(pick(WHY_BEST, seed + 9));
        }
        _ => {}
    }

    paragraph
}

fn change_sentence(route: &RankedRoute, departure: i64, now: DepartureTime, seed: u64) -> &'static str {
    let later = now.plus_minutes(departure);
    let (now_factor, later_factor) = (time_factor(now), time_factor(later));
    let (now_ramp, later_ramp) = (transition_multiplier(now), transition_multiplier(later));

    let at_peak = later_ramp >= 1.4 && later_factor > 0.7;
    let building = later_ramp > 1.2 && now_ramp < 1.2;
    let easing = (now_ramp > 1.2 && later_ramp < 1.1) || later_factor < now_factor - 0.15;

    if at_peak {
        pick(LATER_PEAK, seed + 1)
    } else if building {
        pick(LATER_BUILDING, seed + 2)
    } else if easing {
        pick(LATER_EASING, seed + 3)
    } else if future_color(route, departure).rank() == 0 {
        pick(LATER_STEADY_CLEAR, seed + 4)
    } else {
        pick(LATER_STEADY_BUSY, seed + 5)
    }
}

fn weather_sentence(weather: Option<&Weather>, departure: i64, seed: u64) -> &'static str {
    match WeatherTier::classify(weather) {
        WeatherTier::Storm => pick(WEATHER_STORM, seed),
        WeatherTier::Rain if departure > 5 => pick(WEATHER_WET_LATER, seed),
        WeatherTier::Rain => pick(WEATHER_WET_NOW, seed),
        WeatherTier::Drizzle => pick(WEATHER_WET_NOW, seed + 1),
        WeatherTier::Clear => pick(WEATHER_FAIR, seed),
    }
}
