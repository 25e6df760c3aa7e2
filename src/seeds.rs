//! Seed data: built-in fallback questions so the dungeon stays playable when
//! neither the remote bank nor a config bank is available.

use crate::domain::{Question, QuestionOption};

fn opt(label: char, text: &str) -> QuestionOption {
  QuestionOption { label, text: text.into() }
}

/// Minimal bank covering each realm. Every entry satisfies the sanitizer.
pub fn seed_questions() -> Vec<Question> {
  vec![
    Question {
      id: "seed-math-01".into(),
      subject: Some("Mathematics".into()),
      prompt: Some(
        "A cyclist rides 24 km in 90 minutes, rests for half an hour, then covers \
         another 16 km in one hour. What was the cyclist's average speed, in \
         kilometres per hour, over the whole trip including the rest?"
          .into(),
      ),
      image_url: None,
      correct_answer_label: 'C',
      options: vec![
        opt('A', "12 km/h"),
        opt('B', "16 km/h"),
        opt('C', "13.3 km/h"),
        opt('D', "20 km/h"),
      ],
    },
    Question {
      id: "seed-science-01".into(),
      subject: Some("Physics".into()),
      prompt: Some(
        "A ball is dropped from rest near the surface of the Earth and air \
         resistance is negligible. Taking g = 10 m/s², how far does the ball \
         fall during the third second of its motion?"
          .into(),
      ),
      image_url: None,
      correct_answer_label: 'B',
      options: vec![
        opt('A', "10 m"),
        opt('B', "25 m"),
        opt('C', "45 m"),
        opt('D', "20 m"),
      ],
    },
    Question {
      id: "seed-humanities-01".into(),
      subject: Some("World History".into()),
      prompt: Some(
        "In the second half of the fifteenth century the movable-type printing \
         press spread from Mainz across the cities of Europe, and within two \
         generations presses were operating from Lisbon to Kraków. Contemporary \
         accounts describe merchants, students, and clergy buying printed \
         grammars, calendars, and pamphlets at a fraction of the price of a \
         copied manuscript. Which of the following best describes a direct \
         consequence of this diffusion?"
          .into(),
      ),
      image_url: None,
      correct_answer_label: 'B',
      options: vec![
        opt('A', "Manuscript copying disappeared within a decade across Europe"),
        opt('B', "Texts and ideas circulated faster, in cheaper and more standardized editions"),
        opt('C', "Literacy became universal among the rural population"),
        opt('D', "Latin was abandoned as the language of scholarship"),
      ],
    },
    Question {
      id: "seed-languages-01".into(),
      subject: Some("English".into()),
      prompt: Some(
        "In the sentence 'The committee, whose members rarely agree on anything, \
         reached a unanimous decision,' the clause between the commas functions as:"
          .into(),
      ),
      image_url: None,
      correct_answer_label: 'B',
      options: vec![
        opt('A', "a restrictive relative clause"),
        opt('B', "a non-restrictive relative clause"),
        opt('C', "an adverbial clause of concession"),
        opt('D', "a noun complement clause"),
      ],
    },
  ]
}
