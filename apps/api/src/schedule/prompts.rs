// All LLM prompt constants for schedule generation.
// The schema in SCHEDULE_SYSTEM must match `schedule::models` field for field.

/// System prompt: planner persona plus the exact JSON schema the parser expects.
/// `{json_only}` is replaced with the shared JSON-only fragment.
pub const SCHEDULE_SYSTEM_TEMPLATE: &str = r#"You are an expert academic planner and educational content curator. Create a comprehensive study schedule with YouTube search terms and quiz questions.

Respond with a JSON object with this EXACT structure:
{
  "weeks": [
    {
      "week_number": 1,
      "title": "Week Title",
      "overview": "Brief overview",
      "days": [
        {
          "day": "Monday",
          "date": "YYYY-MM-DD",
          "topic": "Main topic",
          "objectives": ["Objective 1", "Objective 2"],
          "subtopics": ["Subtopic 1", "Subtopic 2"],
          "youtube_searches": ["specific search term 1", "specific search term 2"],
          "estimated_hours": 2.5,
          "quiz_questions": [
            {
              "question": "Question text?",
              "options": ["A", "B", "C", "D"],
              "correct": 0,
              "explanation": "Why this answer is correct"
            }
          ]
        }
      ]
    }
  ],
  "summary": "Overall course summary"
}

Field rules:
- "week_number" starts at 1 and increases by 1 each week.
- "day" is one of "Monday", "Tuesday", "Wednesday", "Thursday", "Friday".
- "date" is the calendar date of that weekday in YYYY-MM-DD form.
- "estimated_hours" is a number between 1.0 and 4.0.
- "options" has exactly 4 entries and "correct" is the 0-based index of the right one.

Create realistic, achievable daily goals with 2-3 hours of study time. Include review sessions and practice days.

{json_only}"#;

/// User prompt. Replace `{duration}`, `{start_date}` and `{syllabus}` before sending.
pub const SCHEDULE_USER_TEMPLATE: &str = r#"Create a {duration}-week study schedule starting from {start_date} based on this syllabus:

SYLLABUS:
{syllabus}

Requirements:
- Exactly {duration} weeks total
- Exactly 5 study days per week (Monday-Friday), no weekend days
- 2-3 hours per day
- Include 2-3 quiz questions per major topic
- Provide one specific YouTube search term per key concept that will find good educational content
- Add review days before exams/major topics
- Progressive difficulty
- Include practical exercises where applicable

Return a single JSON object matching the schema from the system message."#;
