use crate::{
    schemas::validation::PACKING_ITEM_COUNT,
    types::{Locale, TravelInputs},
};

/// Fixed prompt for the connection health check
pub const CONNECTION_TEST_PROMPT: &str = "API Connection Test. Reply 'OK' only.";

/// Instruction text for an itinerary request.
pub fn itinerary_prompt(inputs: &TravelInputs, locale: Locale) -> String {
    match locale {
        Locale::Korean => korean_prompt(inputs, locale),
        Locale::English => english_prompt(inputs, locale),
    }
}

fn korean_prompt(inputs: &TravelInputs, locale: Locale) -> String {
    format!(
        "당신은 지능형 여행 일정 생성기 '트래블 버디'입니다.\n\
         다음 목적지와 조건에 맞는 여행 계획을 JSON 형식으로 작성해 주세요.\n\
         반드시 구글 검색 도구로 해당 지역의 현재 날씨와 진행 중인 축제, 행사 정보를 확인하세요.\n\
         \n\
         - 목적지: {destination}\n\
         - 기간: {days}일\n\
         - 선호 스타일: {style}\n\
         \n\
         [필수 데이터 요구사항]\n\
         1. realTimeHighlights: 현재 기온, 날씨 상태, 오늘 기준 진행 중인 축제나 이벤트를 반드시 포함하세요.\n\
         2. itinerary: day 값은 1부터 {days}까지 순서대로, 하루도 빠짐없이 작성하세요.\n\
         3. activities: 각 장소의 정확한 도로명 주소(address)와 {map} URL(mapUrl)을 검색해서 넣으세요.\n\
         4. packingItems: 현재 현지 날씨에 꼭 필요한 아이템 {packing}가지를 선정하세요.\n\
         5. estimatedCosts: 모든 비용은 {currency} 기준 정수로 작성하고, total은 나머지 항목의 합계와 같아야 합니다.\n\
         6. 응답은 반드시 {language}로 작성되어야 합니다.",
        destination = inputs.destination.trim(),
        days = inputs.days,
        style = inputs.style.label(),
        map = locale.map_service(),
        packing = PACKING_ITEM_COUNT,
        currency = locale.currency(),
        language = locale.language(),
    )
}

fn english_prompt(inputs: &TravelInputs, locale: Locale) -> String {
    format!(
        "You are 'Travel Buddy', an itinerary generator.\n\
         Write a complete travel plan in JSON for the destination and conditions below.\n\
         You must use the Google Search tool to check the current weather and any festivals or events happening there now.\n\
         \n\
         - Destination: {destination}\n\
         - Length: {days} days\n\
         - Preferred style: {style}\n\
         \n\
         [Required data]\n\
         1. realTimeHighlights: current temperature, weather conditions, and festivals or events running today.\n\
         2. itinerary: number the days 1 to {days} in order, with no day missing.\n\
         3. activities: look up the exact street address (address) and a {map} link (mapUrl) for every place.\n\
         4. packingItems: pick exactly {packing} items needed for the current local weather.\n\
         5. estimatedCosts: every amount is an integer in {currency}; total equals the sum of the other amounts.\n\
         6. Write every text field in {language}.",
        destination = inputs.destination.trim(),
        days = inputs.days,
        style = inputs.style.label(),
        map = locale.map_service(),
        packing = PACKING_ITEM_COUNT,
        currency = locale.currency(),
        language = locale.language(),
    )
}
