//! Weather snapshot banding and the weather-driven recommendation question.
//!
//! Thresholds follow the Korean Meteorological Administration display bands
//! for the Jamsil station.

use serde::{Deserialize, Serialize};

/// Indoor-only venues reachable from Lotte World Tower without going outside
pub const ALLOWED_INDOOR_LOCATION_TYPES: [&str; 6] = [
    "롯데월드몰(실내)",
    "롯데백화점(실내)",
    "롯데호텔(실내)",
    "시그니엘(실내)",
    "잠실지하종합상가(실내)",
    "캐슬플라자(실내)",
];

/// Current weather snapshot for the Jamsil area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherInfo {
    pub temperature: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub precip_mm: f64,
    #[serde(default)]
    pub snow_cm: f64,
    #[serde(default)]
    pub wind_speed: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pm25: Option<f64>,
    #[serde(default)]
    pub pm10: Option<f64>,
}

impl WeatherInfo {
    pub fn new(temperature: f64) -> Self {
        Self {
            temperature,
            feels_like: None,
            humidity: 0.0,
            precip_mm: 0.0,
            snow_cm: 0.0,
            wind_speed: 0.0,
            description: String::new(),
            pm25: None,
            pm10: None,
        }
    }

    pub fn feels_like(&self) -> f64 {
        self.feels_like.unwrap_or(self.temperature)
    }

    /// Whether conditions call for indoor-only recommendations, judged for
    /// a Lotte World Tower worker.
    pub fn needs_indoor(&self) -> bool {
        self.precip_mm >= 5.0
            || self.snow_cm >= 5.0
            || self.temperature >= 33.0
            || self.temperature <= -6.0
            || self.feels_like() <= -8.0
            || self.pm25.unwrap_or(0.0) >= 75.0
            || self.wind_speed >= 9.0
    }
}

/// Coarse temperature band used in the weather question
pub fn temp_group(temperature: f64) -> &'static str {
    if temperature <= 5.0 {
        "춥다"
    } else if temperature >= 28.0 {
        "덥다"
    } else {
        "적당하다"
    }
}

/// Coarse precipitation band used in the weather question
pub fn precip_type(mm: f64) -> &'static str {
    if mm <= 0.0 {
        "없음"
    } else if mm < 3.0 {
        "약한 비"
    } else if mm < 15.0 {
        "강한 비"
    } else {
        "매우 강한 비"
    }
}

fn pm25_severity(value: f64) -> i8 {
    if value <= 15.0 {
        0
    } else if value <= 35.0 {
        1
    } else if value <= 75.0 {
        2
    } else {
        3
    }
}

fn pm10_severity(value: f64) -> i8 {
    if value <= 30.0 {
        0
    } else if value <= 80.0 {
        1
    } else if value <= 150.0 {
        2
    } else {
        3
    }
}

/// Combined particulate-matter status from PM2.5 and PM10, worse band wins
pub fn pm_status(pm25: Option<f64>, pm10: Option<f64>) -> &'static str {
    let severity = match (pm25, pm10) {
        (None, None) => return "확인 불가",
        (fine, coarse) => fine
            .map(pm25_severity)
            .unwrap_or(-1)
            .max(coarse.map(pm10_severity).unwrap_or(-1)),
    };
    match severity {
        0 => "좋음",
        1 => "보통",
        2 => "나쁨",
        _ => "매우 나쁨",
    }
}

/// Build the weather-driven question submitted on behalf of the user.
/// Appends the indoor-only constraint block when conditions require it.
pub fn build_weather_question(weather: &WeatherInfo) -> String {
    let precip = precip_type(weather.precip_mm);
    let sky = if precip == "없음" { "맑음" } else { "흐림" };

    let mut status_parts = vec![
        format!(
            "잠실 현재 기온 {}℃(체감 {}℃)",
            weather.temperature,
            weather.feels_like()
        ),
        format!("습도 {}%", weather.humidity as i64),
        format!("강수량 {}mm", weather.precip_mm),
        format!("풍속 {}m/s", weather.wind_speed),
    ];
    if !weather.description.is_empty() {
        status_parts.push(weather.description.clone());
    }
    let status_lines = status_parts
        .iter()
        .map(|status| format!("- {status}"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut question = format!(
        r#"
너는 한국 음식 문화와 직장인 점심/저녁 동선에 매우 익숙한 추천 AI다.
날씨와 체감 환경을 고려하여 음식을 추천하되,
아래 "출력 제약"을 반드시 지켜야 한다.

### 입력 정보
- 온도: "{temp}"
- 하늘: "{sky}"
- 바람: "{precip}"
- 대기질:"{pm}"

### 한국 음식 문화 규칙
1. 비가 오면 전, 칼국수, 수제비, 국물 요리 선호
2. 매우 강한 비나 외출이 힘들면 배달 음식(치킨, 피자, 짬뽕) 선호
3. 추우면 뜨겁고 진한 국물, 고기, 찌개 선호
4. 더우면 냉면, 콩국수, 비빔국수, 치킨, 맥주 선호
5. 미세먼지가 나쁘면 국물 요리, 보양식, 마늘 많은 음식 선호
6. 미세먼지가 매우 나쁘면 외출을 최소화하고 자극적인 실내 음식 선호
7. 날씨가 나쁘면 외부 이동을 최소화함


#### 현재 잠실 날씨:
{status_lines}
"#,
        temp = temp_group(weather.temperature),
        pm = pm_status(weather.pm25, weather.pm10),
    );

    if weather.needs_indoor() {
        let allowed_list = ALLOWED_INDOOR_LOCATION_TYPES
            .iter()
            .map(|place| format!("- {place}"))
            .collect::<Vec<_>>()
            .join("\n");
        question.push_str(&format!(
            r#"

### 출력 제약 (반드시 준수)
- 추천 음식점은 **실내 이동만 가능한 장소에서만 선택**
- 아래 장소 유형 중에서만 추천할 것

[허용 장소 유형 - 이 외는 절대 추천 금지]

{allowed_list}
"#
        ));
    }

    question
}
