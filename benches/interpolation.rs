use aqmet::{
    interpolate, AirQualityStationDay, DistanceMatrix, IdwParams, StationCoordinate,
    WeatherObservation,
};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn synthetic_inputs() -> (
    Vec<WeatherObservation>,
    Vec<AirQualityStationDay>,
    DistanceMatrix,
    Vec<String>,
) {
    let weather: Vec<StationCoordinate> = (0..25)
        .map(|i| {
            StationCoordinate::new(
                format!("w{i}"),
                40.0 + (i / 5) as f64 * 0.1,
                -3.0 - (i % 5) as f64 * 0.1,
            )
        })
        .collect();
    let air_quality: Vec<StationCoordinate> = (0..20)
        .map(|i| {
            StationCoordinate::new(
                format!("aq{i}"),
                40.05 + (i / 4) as f64 * 0.1,
                -3.05 - (i % 4) as f64 * 0.1,
            )
        })
        .collect();
    let matrix = DistanceMatrix::build(&air_quality, &weather).unwrap();

    let variables = vec!["average_temperature".to_string(), "rainfall".to_string()];
    let mut observations = Vec::new();
    let mut station_days = Vec::new();
    for day in 1..=30u32 {
        let date = NaiveDate::from_ymd_opt(2019, 6, day).unwrap();
        for (i, station) in weather.iter().enumerate() {
            let mut observation = WeatherObservation::new(date, &station.id)
                .with_reading("average_temperature", 15.0 + i as f64 * 0.3);
            if i % 3 != 0 {
                observation = observation.with_reading("rainfall", 0.1 * i as f64);
            }
            observations.push(observation);
        }
        for station in &air_quality {
            station_days.push(AirQualityStationDay::new(date, &station.id));
        }
    }
    (observations, station_days, matrix, variables)
}

fn bench_interpolate(c: &mut Criterion) {
    let (observations, station_days, matrix, variables) = synthetic_inputs();
    c.bench_function("interpolate_30_days", |b| {
        b.iter(|| {
            interpolate(
                black_box(&observations),
                black_box(&station_days),
                &matrix,
                &variables,
                IdwParams::default(),
            )
        })
    });
}

criterion_group!(benches, bench_interpolate);
criterion_main!(benches);
