use quiz_core::model::QuestionDraft;
use services::QuizFile;

/// Built-in hiragana warm-up used when no quiz file is given.
pub fn sample_quiz() -> QuizFile {
    QuizFile {
        questions: vec![
            QuestionDraft::new("What is the hiragana for 'a'?", ["あ", "い", "う", "え"], 0)
                .with_explanation("あ (a) is the first hiragana character."),
            QuestionDraft::new("Which character reads 'ki'?", ["か", "き", "く", "け"], 1)
                .with_explanation("き is ka-row, i-column."),
            QuestionDraft::new("How is つ romanized?", ["tsu", "su", "tu", "chi"], 0)
                .with_subject("つ")
                .with_explanation("つ is written 'tsu' in Hepburn romanization."),
            QuestionDraft::new("Which one is katakana 'n'?", ["ソ", "ン", "シ", "ツ"], 1)
                .with_explanation("ン strokes rise from bottom-left; ソ strokes fall from the top."),
        ],
    }
}
