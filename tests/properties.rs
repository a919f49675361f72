//! Property-based tests for extraction, sectioning, matching and composition

use chrono::NaiveDate;
use job_assistant::output::compose::DocumentComposer;
use job_assistant::processing::matcher::{match_percentage, SkillMatcher};
use job_assistant::processing::vocabulary::Vocabulary;
use job_assistant::{ApplicationAnalyzer, ApplicationInput, ProfileInput};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::OnceLock;

fn analyzer() -> &'static ApplicationAnalyzer {
    static ANALYZER: OnceLock<ApplicationAnalyzer> = OnceLock::new();
    ANALYZER.get_or_init(|| ApplicationAnalyzer::new(Vocabulary::builtin().unwrap()).unwrap())
}

fn vocabulary_terms() -> Vec<String> {
    let mut seen = HashSet::new();
    analyzer()
        .vocabulary()
        .all_skill_terms()
        .filter(|term| seen.insert(term.to_string()))
        .map(str::to_string)
        .collect()
}

// Filler words that contain no vocabulary term
fn filler_word() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "built", "shipped", "services", "with", "the", "platform", "fast", "and", "in", "production",
    ])
    .prop_map(String::from)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pool {
    Skill,
    Soft,
    Qualification,
    Filler,
}

fn soft_skill_terms() -> Vec<String> {
    analyzer().vocabulary().soft_skills.clone()
}

fn qualification_terms() -> Vec<String> {
    analyzer().vocabulary().qualifications.clone()
}

// Terms and filler joined by separators that keep punctuated terms whole
fn requirement_text() -> impl Strategy<Value = (String, Vec<(String, Pool)>)> {
    prop::collection::vec(
        prop_oneof![
            prop::sample::select(vocabulary_terms()).prop_map(|t| (t, Pool::Skill)),
            prop::sample::select(soft_skill_terms()).prop_map(|t| (t, Pool::Soft)),
            prop::sample::select(qualification_terms()).prop_map(|t| (t, Pool::Qualification)),
            filler_word().prop_map(|w| (w, Pool::Filler)),
        ],
        0..20,
    )
    .prop_map(|tokens| {
        let text = tokens
            .iter()
            .map(|(token, _)| token.to_uppercase())
            .collect::<Vec<_>>()
            .join(", ");
        (text, tokens)
    })
}

fn resume_line() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "Experience", "Education", "Skills", "Projects", "Certifications", "Summary", "Work History",
            "Skills and Certifications",
        ])
        .prop_map(String::from),
        "[a-z]{1,8}( [a-z]{1,8}){0,5}",
        Just(String::new()),
        Just("   ".to_string()),
    ]
}

fn skill_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z+#.]{1,6}", 0..12)
}

proptest! {
    #[test]
    fn extracted_terms_are_known_unique_and_whole_words((text, tokens) in requirement_text()) {
        let extractor = analyzer().requirement_extractor();
        let requirements = extractor.extract(&text);
        prop_assert_eq!(&requirements.skills, &extractor.extract_skills(&text));

        let lists = [
            (Pool::Skill, &requirements.skills, vocabulary_terms()),
            (Pool::Soft, &requirements.soft_skills, soft_skill_terms()),
            (Pool::Qualification, &requirements.qualifications, qualification_terms()),
        ];
        for (pool, extracted, known) in lists {
            let known: HashSet<String> = known.into_iter().collect();
            let unique: HashSet<&String> = extracted.iter().collect();
            prop_assert_eq!(unique.len(), extracted.len());

            for term in extracted {
                prop_assert!(known.contains(term), "{} is not a {:?} term", term, pool);
                prop_assert!(extractor.mentions(&text, term), "{} is not a whole word in {:?}", term, text);
            }
            for (token, token_pool) in &tokens {
                if *token_pool == pool {
                    prop_assert!(extracted.contains(token), "{} inserted but not extracted from {:?}", token, text);
                }
            }
        }
    }

    #[test]
    fn sectionizer_keeps_every_content_line_once(lines in prop::collection::vec(resume_line(), 0..30)) {
        let sectionizer = analyzer().sectionizer();
        let text = lines.join("\n");
        let sections = sectionizer.sectionize(&text);

        let mut expected: Vec<String> = lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty() && sectionizer.heading_of(line).is_none())
            .map(str::to_string)
            .collect();
        let mut actual: Vec<String> = sections
            .iter()
            .filter(|(_, content)| !content.is_empty())
            .flat_map(|(_, content)| content.lines().map(str::to_string).collect::<Vec<_>>())
            .collect();

        expected.sort();
        actual.sort();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn matcher_partitions_requirements(requirements in skill_list(), candidates in skill_list()) {
        let result = SkillMatcher::new().match_skills(&requirements, &candidates);

        prop_assert_eq!(result.requirement_count(), requirements.len());
        prop_assert!(result.match_percentage <= 100);

        let mut classified: Vec<&str> = result
            .matched
            .iter()
            .chain(&result.partial)
            .map(|pair| pair.requirement.as_str())
            .chain(result.missing.iter().map(String::as_str))
            .collect();
        let mut original: Vec<&str> = requirements.iter().map(String::as_str).collect();
        classified.sort();
        original.sort();
        prop_assert_eq!(classified, original);

        for pair in &result.matched {
            prop_assert!(candidates.iter().any(|c| c.eq_ignore_ascii_case(&pair.requirement)));
        }
        for pair in &result.partial {
            prop_assert!(pair.candidate.contains(pair.requirement.as_str()) || pair.requirement.contains(pair.candidate.as_str()));
        }

        if requirements.is_empty() {
            prop_assert_eq!(result.match_percentage, 0);
        } else {
            let covered = result.matched.len() + result.partial.len();
            let expected = (covered as f64 * 100.0 / requirements.len() as f64).round() as u8;
            prop_assert_eq!(result.match_percentage, expected);
        }
    }

    #[test]
    fn percentage_is_bounded(covered in 0usize..500, extra in 0usize..500) {
        let total = covered + extra;
        let pct = match_percentage(covered, total);
        prop_assert!(pct <= 100);
        if total == 0 {
            prop_assert_eq!(pct, 0);
        }
        if covered == total && total > 0 {
            prop_assert_eq!(pct, 100);
        }
    }

    #[test]
    fn composition_is_deterministic(
        resume in "[A-Za-z0-9 ,.%\n]{0,200}",
        job in "[A-Za-z0-9 ,.+\n]{0,200}",
        about in proptest::option::of("[A-Za-z ,.]{0,60}"),
    ) {
        let analysis = analyzer().analyze(&ApplicationInput {
            resume_text: resume,
            job_text: job,
            profile: ProfileInput { url: None, about },
        });
        let at = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap().and_hms_opt(23, 59, 59).unwrap();
        let composer = DocumentComposer::new(analyzer().vocabulary());

        let first = composer.compose_all(&analysis, at).unwrap();
        let second = composer.compose_all(&analysis, at).unwrap();
        prop_assert_eq!(first, second);
    }
}
