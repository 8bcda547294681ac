//! Report formatting
//!
//! Renders a [`KayakReport`] into the Spanish text message posted to
//! Telegram (Markdown flavour) or printed to standard output. Pure
//! presentation: every number shown here was computed upstream.

use crate::kayak_forecast::{DayOutlook, KayakReport, ScoredResult};
use crate::scoring::AVOID_THRESHOLD;
use std::fmt::Write;

const RULE_HEAVY: &str =
    "══════════════════════════════════════════════════";
const RULE_LIGHT: &str =
    "──────────────────────────────────────────────────";

/// Spanish month name (1-based)
fn spanish_month_name(month: u32) -> &'static str {
    match month {
        1 => "enero",
        2 => "febrero",
        3 => "marzo",
        4 => "abril",
        5 => "mayo",
        6 => "junio",
        7 => "julio",
        8 => "agosto",
        9 => "septiembre",
        10 => "octubre",
        11 => "noviembre",
        _ => "diciembre",
    }
}

fn position_emoji(position: usize) -> &'static str {
    match position {
        0 => "🥇",
        1 => "🥈",
        2 => "🥉",
        _ => "🔹",
    }
}

fn format_knots(value: Option<f64>) -> String {
    value.map_or_else(|| "N/D".to_string(), |v| format!("{v:.1} nudos"))
}

fn format_wave(value: Option<f64>) -> String {
    value.map_or_else(|| "N/D".to_string(), |v| format!("{v:.2}m"))
}

fn format_temperature(value: Option<f64>) -> String {
    value.map_or_else(|| "N/D".to_string(), |v| format!("{v:.0}°C"))
}

/// Render the full report text
#[must_use]
pub fn render(report: &KayakReport, top_n: usize) -> String {
    use chrono::{Datelike, Timelike};

    let mut text = String::new();

    let generated = report.generated_at;
    text.push_str("🛶 *RECOMENDACIONES KAYAK OFFSHORE - MALLORCA*\n");
    let _ = writeln!(
        text,
        "📅 {} de {} de {} | {:02}:{:02}",
        generated.day(),
        spanish_month_name(generated.month()),
        generated.year(),
        generated.hour(),
        generated.minute()
    );
    text.push_str(RULE_HEAVY);
    text.push_str("\n\n");

    for day in &report.days {
        render_day(&mut text, day, top_n);
    }

    text.push_str(RULE_HEAVY);
    text.push('\n');
    match &report.best {
        Some(best) => {
            text.push_str("🎯 *MEJOR DÍA PARA OFFSHORE*:\n");
            let _ = writeln!(
                text,
                "   📅 {} {:02}/{:02}",
                best.day_name,
                best.date.day(),
                best.date.month()
            );
            let _ = writeln!(text, "   📍 {}", best.zone_name);
            let _ = writeln!(text, "   ⭐ Puntuación: {:.1}/10", best.score);
        }
        None => {
            text.push_str("⚠️ Sin datos de previsión en esta ejecución - no hay recomendación\n");
        }
    }
    text.push('\n');

    text.push_str("💡 *CONSEJOS*:\n");
    text.push_str("   • Salida recomendada: 6:00-7:00 AM (antes de vientos fuertes)\n");
    text.push_str("   • Lleva: Traje neopreno 3-5mm, casco, GPS\n");
    text.push_str("   • Avisa a alguien: nunca salgas solo en offshore\n");
    text.push_str("   • Revisa condiciones antes de salir\n\n");

    text.push_str("🔗 *Fuente*: Open-Meteo (datos en tiempo real)\n");

    text
}

fn render_day(text: &mut String, day: &DayOutlook, top_n: usize) {
    use chrono::Datelike;

    let _ = writeln!(
        text,
        "📌 *{} {:02}/{:02}*",
        day.day_name.to_uppercase(),
        day.date.day(),
        day.date.month()
    );
    text.push_str(RULE_LIGHT);
    text.push('\n');

    if day.ranked.is_empty() {
        text.push_str("⚠️ Sin datos de previsión para este día\n\n");
        return;
    }

    for (position, result) in day.top(top_n).iter().enumerate() {
        render_entry(text, position, result);
    }

    if let Some(worst) = day.worst() {
        if worst.score < AVOID_THRESHOLD {
            let _ = writeln!(
                text,
                "❌ *EVITAR*: {} ({:.1}/10)",
                worst.zone_name, worst.score
            );
            let _ = writeln!(
                text,
                "   Condiciones adversas - viento {}, olas {}",
                format_knots(worst.conditions.wind_speed_max_kn),
                format_wave(worst.conditions.wave_height_m)
            );
        }
    }

    text.push('\n');
}

fn render_entry(text: &mut String, position: usize, result: &ScoredResult) {
    let _ = writeln!(
        text,
        "{} *{}* {} {}",
        position_emoji(position),
        result.zone_name,
        result.rating.emoji(),
        result.rating
    );
    let _ = writeln!(text, "   ⭐ Puntuación: {:.1}/10", result.score);
    let _ = writeln!(
        text,
        "   💨 Viento: {}",
        format_knots(result.conditions.wind_speed_max_kn)
    );
    let _ = writeln!(
        text,
        "   🌊 Olas: {}",
        format_wave(result.conditions.wave_height_m)
    );
    let _ = writeln!(
        text,
        "   🌡️ Temperatura: {}",
        format_temperature(result.conditions.temperature_max_c)
    );

    if let Some(rain) = result.conditions.precipitation_mm {
        if rain > 0.0 {
            let _ = writeln!(text, "   🌧️ Lluvia: {rain:.1}mm");
        }
    }

    text.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kayak_forecast::build_report;
    use crate::models::{DayConditions, MALLORCA_ZONES, ZoneForecast};
    use chrono::TimeZone;
    use chrono_tz::Europe::Madrid;

    fn sample_report() -> KayakReport {
        let ideal = DayConditions {
            wind_speed_max_kn: Some(8.0),
            wave_height_m: Some(0.6),
            visibility_km: Some(18.0),
            precipitation_mm: Some(0.0),
            temperature_max_c: Some(21.0),
        };
        let stormy = DayConditions {
            wind_speed_max_kn: Some(25.0),
            wave_height_m: Some(2.2),
            visibility_km: Some(5.0),
            precipitation_mm: Some(8.0),
            temperature_max_c: Some(15.0),
        };

        let forecasts = vec![
            ZoneForecast {
                zone: MALLORCA_ZONES[0],
                days: vec![ideal],
            },
            ZoneForecast {
                zone: MALLORCA_ZONES[1],
                days: vec![stormy],
            },
        ];

        let generated_at = Madrid.with_ymd_and_hms(2026, 8, 6, 11, 0, 0).unwrap();
        build_report(&forecasts, 1, generated_at)
    }

    #[test]
    fn test_render_contains_header_and_footer() {
        let text = render(&sample_report(), 3);

        assert!(text.contains("RECOMENDACIONES KAYAK OFFSHORE"));
        assert!(text.contains("6 de agosto de 2026 | 11:00"));
        assert!(text.contains("CONSEJOS"));
        assert!(text.contains("Open-Meteo"));
    }

    #[test]
    fn test_render_day_block() {
        let text = render(&sample_report(), 3);

        assert!(text.contains("📌 *JUEVES 06/08*"));
        assert!(text.contains("🥇 *Isla Dragonera*"));
        assert!(text.contains("💨 Viento: 8.0 nudos"));
        assert!(text.contains("🌊 Olas: 0.60m"));
        assert!(text.contains("🌡️ Temperatura: 21°C"));
    }

    #[test]
    fn test_render_avoid_callout_for_bad_zone() {
        let text = render(&sample_report(), 3);

        assert!(text.contains("❌ *EVITAR*: Isla de Cabrera"));
        assert!(text.contains("viento 25.0 nudos"));
        // Rain line only rendered when precipitation is positive
        assert!(text.contains("🌧️ Lluvia: 8.0mm"));
    }

    #[test]
    fn test_render_best_pick_summary() {
        let text = render(&sample_report(), 3);

        assert!(text.contains("MEJOR DÍA PARA OFFSHORE"));
        assert!(text.contains("📍 Isla Dragonera"));
    }

    #[test]
    fn test_render_no_data_report() {
        let generated_at = Madrid.with_ymd_and_hms(2026, 8, 6, 11, 0, 0).unwrap();
        let report = build_report(&[], 2, generated_at);
        let text = render(&report, 3);

        assert!(text.contains("Sin datos de previsión para este día"));
        assert!(text.contains("no hay recomendación"));
        // The footer is rendered even without data
        assert!(text.contains("CONSEJOS"));
    }

    #[test]
    fn test_render_missing_metrics_as_nd() {
        let forecasts = vec![ZoneForecast {
            zone: MALLORCA_ZONES[0],
            days: vec![DayConditions::default()],
        }];
        let generated_at = Madrid.with_ymd_and_hms(2026, 8, 6, 11, 0, 0).unwrap();
        let report = build_report(&forecasts, 1, generated_at);
        let text = render(&report, 3);

        assert!(text.contains("💨 Viento: N/D"));
        assert!(text.contains("🌊 Olas: N/D"));
    }
}
