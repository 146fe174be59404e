//! Prompt texts for the workflow nodes. Korean on purpose: the corpus,
//! questions and answers are all Korean.

/// Gate prompt: is the question about restaurant recommendation at all
pub const QUESTION_GATE: &str = r#"당신은 사용자 질문이 '음식, 식당 추천'과 관련이 있는지 평가하는 평가자입니다.
다음은 사용자 질문입니다:

-------

${var:question}

-------

질문이 '${var:locale:잠실} 음식, 식당 추천'과 관련이 있으면 'yes', 그렇지 않으면 'no'로 평가하세요.
'yes' 또는 'no'의 이진 점수를 부여하세요."#;

/// Grade prompt: are the retrieved documents relevant to the question
pub const DOCUMENT_GRADE: &str = r#"당신은 검색된 문서가 사용자 질문과 관련이 있는지 평가하는 채점자입니다.
다음은 검색된 문서입니다:

-------

${var:context}

-------

다음은 사용자 질문입니다: ${var:question}
문서의 내용이 사용자 질문과 관련이 있으면 관련 있음으로 평가하세요.
문서가 질문과 관련이 있는지 나타내는 'yes' 또는 'no'의 이진 점수를 부여하세요.
Yes: 문서가 질문과 관련이 있습니다.
No: 문서가 질문과 관련이 없습니다."#;

/// Rewrite prompt: improve a question that retrieved irrelevant documents
pub const QUERY_REWRITE: &str = r#"입력을 보고 기본적인 의미나 의도를 파악해보세요.
다음은 초기 질문입니다:

-------

${var:question}

-------

개선된 질문을 작성하세요:"#;

/// Generation prompt: recommend restaurants from the graded context
pub const ANSWER_GENERATION: &str = r#"당신은 음식점 추천 전문가입니다. 아래 context 데이터를 분석하여 사용자에게 최적의 음식점을 추천해주세요.

고려사항:
1. 사용자 검색어: ${var:question}
2. 가격대, 리뷰 수, 위치, 특징을 종합적으로 고려
3. 사용자 상황(날씨와, 이전에 먹었던 메뉴)에 맞는 추천
4. metadata에 naver_id가 있으면 네이버 지도 링크를, homepage_url이 있으면 그 링크를 포함하세요.
5. metadata에 main_thumbnail_url이 있으면 해당 이미지를 함께 제시하세요.

응답 형식:
- 1-2개의 최고 추천 음식점 선정
- 각 음식점의 강점 설명
- 추천 메뉴 제시
- 간단한 이유 설명
- 전체 메뉴와 가격 제시

context:
${var:context}"#;

/// Description of the retrieval tool offered to the agent node
pub const RETRIEVE_TOOL_NAME: &str = "retrieve_restaurants";
pub const RETRIEVE_TOOL_DESCRIPTION: &str = "잠실 주변의 점심 메뉴를 검색하고 정보를 반환합니다.";
