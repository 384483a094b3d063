//! Plain-text rendering of a route response.

use tc_core::{DepartureTime, WeatherTier};
use tc_engine::RouteResponse;
use tc_rank::{Trend, detect_trend, narrate, predict_at};

/// `usual_minutes` is what locals expect for the best route's corridor
/// route, when one matched.
pub fn print(response: &RouteResponse, at: DepartureTime, depart: i64, usual_minutes: Option<f64>) {
    let Some(best) = response.routes.first() else {
        println!("No route found.");
        return;
    };

    let tier = WeatherTier::classify(response.weather.as_ref());
    match &response.weather {
        Some(w) => println!("Weather: {} ({:.0} °C, {:.1} mm rain)\n", tier.as_str(), w.temperature_c, w.rain_mm),
        None => println!("Weather: unavailable\n"),
    }

    for route in &response.routes {
        println!(
            "{:<4}  {:<20}  {:>5.1} km  {:>3}% confidence  {}",
            route.ui_label,
            route.corridor_route.as_deref().unwrap_or("-"),
            route.distance_km,
            route.confidence_pct,
            route.ui_reason,
        );

        let buckets: Vec<String> = route
            .predictions
            .values()
            .map(|b| {
                let when = if b.offset_minutes == 0 { "now".to_owned() } else { format!("+{}", b.offset_minutes) };
                format!("{when} {} ({})", b.formatted_duration, b.color)
            })
            .collect();
        println!("      {}", buckets.join(" | "));
    }

    if let (Some(route), Some(minutes)) = (best.corridor_route.as_deref(), usual_minutes) {
        println!("\nLocals usually allow {minutes:.0} min {route}.");
    }

    if depart > 0 && best.prediction(depart).is_none() {
        let bucket = predict_at(&best.route, response.weather.as_ref(), at, depart);
        println!("\nLeaving in {depart} min: {} ({})", bucket.formatted_duration, bucket.color);
    }

    if !response.road_conditions.is_empty() {
        println!("\nRoad conditions on the best route:");
        for c in &response.road_conditions {
            let incident = c.incident.map(|i| format!("  [{i}]")).unwrap_or_default();
            println!(
                "  {:<28} {:>8}  {:>3.0}/{:>3.0} km/h  +{:.0} s{incident}",
                c.road_name, c.severity, c.predicted_speed_kmh, c.base_speed_kmh, c.delay_secs,
            );
        }
    }

    let trend = match detect_trend(best, depart) {
        Trend::Improving => "improving",
        Trend::Worsening => "worsening",
        Trend::Stable    => "stable",
    };
    println!("\nTrend: {trend}");
    println!("{}", narrate(Some(best), depart, response.weather.as_ref(), at));
}
