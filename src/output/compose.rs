//! Document composition from an application analysis
//!
//! Every document is an askama text template filled from precomputed strings,
//! so the same analysis and timestamp always render the same bytes.

use crate::error::Result;
use crate::processing::analyzer::ApplicationAnalysis;
use crate::processing::matcher::{MatchResult, SkillPair};
use crate::processing::vocabulary::Vocabulary;
use askama::Template;
use chrono::NaiveDateTime;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

const TOOLS_CATEGORY: &str = "tools";
const DEFAULT_TOOLS: [&str; 4] = ["git", "docker", "jenkins", "jira"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    CvImprovements,
    LinkedinSuggestions,
    MotivationLetter,
    InterviewPreparation,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::CvImprovements,
        DocumentKind::LinkedinSuggestions,
        DocumentKind::MotivationLetter,
        DocumentKind::InterviewPreparation,
    ];

    /// File stem used for exported documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::CvImprovements => "cv_improvements",
            DocumentKind::LinkedinSuggestions => "linkedin_suggestions",
            DocumentKind::MotivationLetter => "motivation_letter",
            DocumentKind::InterviewPreparation => "interview_preparation",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::CvImprovements => "CV Improvements",
            DocumentKind::LinkedinSuggestions => "LinkedIn Suggestions",
            DocumentKind::MotivationLetter => "Motivation Letter",
            DocumentKind::InterviewPreparation => "Interview Preparation",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedDocument {
    pub kind: DocumentKind,
    pub content: String,
}

/// Improvement strategy band for a match percentage.
pub fn improvement_strategy(match_percentage: u8) -> &'static str {
    match match_percentage {
        80..=u8::MAX => "FINE-TUNE: your CV already covers most requirements, polish wording and ordering",
        50..=79 => "TARGETED UPDATES: add the missing keywords and rework the sections listed below",
        _ => "MAJOR REWORK: restructure the CV around the job requirements before applying",
    }
}

#[derive(Template)]
#[template(
    ext = "txt",
    source = r#"CV MODIFICATION REQUIREMENTS FOR JOB APPLICATION
Generated on: {{ generated_on }}

MATCH SCORE: {{ match_percentage }}%
STRATEGY: {{ strategy }}

Exact matches: {{ exact_matches }}
Partial matches: {{ partial_matches }}
Missing skills: {{ missing_skills }}

JOB REQUIREMENTS SUMMARY:
- Must-have Skills: {{ must_have }}
- Experience Required: {{ experience_required }}
- Qualifications: {{ qualifications }}

IMMEDIATE MODIFICATIONS REQUIRED:

1. SKILLS SECTION UPDATES:
CURRENT SKILLS LENGTH: {{ skills_length }} characters

ADD THESE SKILLS (Missing from your CV):
{{ add_skills }}

EMPHASIZE THESE EXISTING SKILLS (Already in your CV):
{{ emphasize_skills }}

REMOVE OR DEPRIORITIZE:
- Skills not mentioned in job description
- Outdated or irrelevant technologies

2. EXPERIENCE SECTION ENHANCEMENTS:
CURRENT EXPERIENCE LENGTH: {{ experience_length }} characters

IMMEDIATE UPDATES NEEDED:
{{ experience_gaps }}

ADD QUANTIFIABLE METRICS:
- Include numbers, percentages, and specific outcomes
- Use action verbs: Developed, Led, Implemented, Optimized
- Focus on results rather than responsibilities

3. PROFESSIONAL SUMMARY REWRITE:
CURRENT SUMMARY LENGTH: {{ summary_length }} characters

REQUIRED IMPROVEMENTS:
{{ summary_improvements }}

NEW SUMMARY SHOULD INCLUDE:
- Years of experience matching job requirements
- Key technical skills from job description
- Career objectives aligned with position

4. ACHIEVEMENTS TO HIGHLIGHT:
{{ achievements }}

5. KEYWORDS TO ADD THROUGHOUT CV:
{{ keywords }}

ACTION PLAN:
[X] Update skills section with missing keywords
[X] Rewrite professional summary to match job requirements
[X] Enhance experience descriptions with relevant technologies
[X] Add quantifiable achievements in bullet points
[X] Ensure all job description keywords are included

MODIFIED SECTIONS TEMPLATE:

PROFESSIONAL SUMMARY (Rewrite):
{{ summary_template }}

SKILLS SECTION (Add these):
Technical: {{ technical_additions }}
Tools: {{ tool_additions }}

EXPERIENCE BULLET POINTS (Add these examples):
- Developed solutions using {{ first_skill }} to achieve business objectives
- Collaborated with cross-functional teams to deliver projects on time
- Implemented best practices for {{ second_skill }}
"#
)]
struct CvReportTemplate<'a> {
    generated_on: &'a str,
    match_percentage: u8,
    strategy: &'a str,
    exact_matches: String,
    partial_matches: String,
    missing_skills: String,
    must_have: String,
    experience_required: String,
    qualifications: String,
    skills_length: usize,
    add_skills: String,
    emphasize_skills: String,
    experience_length: usize,
    experience_gaps: String,
    summary_length: usize,
    summary_improvements: String,
    achievements: String,
    keywords: String,
    summary_template: String,
    technical_additions: String,
    tool_additions: String,
    first_skill: &'a str,
    second_skill: &'a str,
}

#[derive(Template)]
#[template(
    ext = "txt",
    source = r#"LINKEDIN PROFILE OPTIMIZATION
Generated on: {{ generated_on }}
Target role: {{ position }} at {{ company }}
{% if has_about %}
ABOUT SECTION ANALYSIS:
- Current length: {{ about_length }} characters
- Profile match: {{ profile_percentage }}%
- Skills already in your About: {{ profile_skills }}

SKILLS TO ADD TO YOUR ABOUT SECTION:
{{ skills_to_add }}

HEADLINE SUGGESTION:
{{ headline }}

ABOUT SECTION REWRITE:
{{ about_rewrite }}
{% else %}
PROFILE: {{ profile_url }}

HEADLINE SUGGESTION:
{{ headline }}

SKILLS TO LIST ON YOUR PROFILE (from your CV):
{{ resume_skills }}

SKILLS TO DEVELOP OR SHOWCASE:
{{ skills_to_add }}

FEATURED ACCOMPLISHMENTS:
{{ featured }}

ABOUT SECTION DRAFT:
{{ about_rewrite }}
{% endif %}
PROFILE CHECKLIST:
[X] Headline names the target role and top skills
[X] About section opens with your experience level
[X] Skills section lists every job keyword you can support
[X] Experience entries repeat the achievements from your CV
"#
)]
struct LinkedinTemplate<'a> {
    generated_on: &'a str,
    position: &'a str,
    company: &'a str,
    has_about: bool,
    about_length: usize,
    profile_percentage: u8,
    profile_skills: String,
    profile_url: &'a str,
    resume_skills: String,
    skills_to_add: String,
    headline: String,
    featured: String,
    about_rewrite: String,
}

#[derive(Template)]
#[template(
    ext = "txt",
    source = r#"MOTIVATION LETTER
Generated on: {{ generated_on }}

[Your Name]
[Your Address] - [Your Email] - [Your Phone] - {{ profile_url }}

{{ letter_date }}

Hiring Manager
{{ company }}
[Company Address]

Subject: Application for {{ position }} Position

Dear Hiring Manager,

I am writing with great enthusiasm to apply for the {{ position }} position at {{ company }}. With my experience in {{ top_three }} and a proven track record in delivering successful projects, I am confident that I have the skills needed to excel in this role.

WHAT I BRING TO {{ company_upper }}:

Technical Expertise:
- Proficient in {{ top_five }}
- Experience with {{ sixth_skill }}
- Strong background in {{ experience_line }}

Key Achievements Relevant to This Role:
{{ achievements }}

Why I'm Excited About This Opportunity:
- The chance to work with technologies like {{ first_skill }}
- The opportunity to contribute to {{ company }}'s mission and projects
- Alignment between the role's requirements and my professional background

I am particularly impressed by {{ company }}'s [mention something specific about the company] and believe my skills in {{ second_skill }} would be valuable for your team.

Thank you for considering my application. I have attached my CV for your review and would welcome the opportunity to discuss how my experience and skills align with your needs.

Sincerely,
[Your Name]
"#
)]
struct MotivationLetterTemplate<'a> {
    generated_on: &'a str,
    letter_date: String,
    profile_url: &'a str,
    company: &'a str,
    company_upper: String,
    position: &'a str,
    top_three: String,
    top_five: String,
    sixth_skill: &'a str,
    experience_line: String,
    achievements: String,
    first_skill: &'a str,
    second_skill: &'a str,
}

#[derive(Template)]
#[template(
    ext = "txt",
    source = r#"COMPREHENSIVE INTERVIEW PREPARATION CHEATSHEET
Generated on: {{ generated_on }}
Position: {{ position }} at {{ company }}

SECTION 1: ROLE ANALYSIS
--------------------------------------------------

TECHNICAL REQUIREMENTS:
{{ technical_requirements }}

EXPERIENCE LEVEL: {{ experience_level }}
QUALIFICATIONS: {{ qualifications }}
SOFT SKILLS REQUIRED: {{ soft_skills }}

SECTION 2: TECHNICAL INTERVIEW PREPARATION
--------------------------------------------------

EXPECTED TECHNICAL QUESTIONS & SUGGESTED ANSWERS:

1. "Describe your experience with {{ first_skill }}"
   SUGGESTED ANSWER:
   "In my previous role, I worked extensively with {{ first_skill }} to develop [specific project].
   I used it for [specific functionality] which resulted in [quantifiable outcome]."

2. "How do you approach problem-solving in technical projects?"
   SUGGESTED ANSWER:
   "I analyze the requirements and break the problem down, research solutions, prototype when needed,
   implement the best approach and test thoroughly. For example, when facing [specific challenge], I used
   this method to [achievement]."

3. "What are the best practices for {{ second_skill }}?"
   SUGGESTED ANSWER:
   "Key best practices include: [mention 3-4 specific practices]. At [previous company], applying these
   practices helped us achieve [specific positive outcome]."

SECTION 3: BEHAVIORAL INTERVIEW PREPARATION
--------------------------------------------------

STAR METHOD TEMPLATES:

1. "Tell me about a challenging project"
   - SITUATION: "At [Company], we faced [specific challenge]..."
   - TASK: "My responsibility was to [specific task]..."
   - ACTION: "I implemented [specific actions] using [technologies]..."
   - RESULT: "This resulted in [quantifiable achievement]..."

2. "Describe a time you had to learn new technology quickly"
   - SITUATION: "When we adopted [new technology] at [Company]..."
   - TASK: "I needed to become proficient within [timeframe]..."
   - ACTION: "I studied [resources], built [practice project], collaborated with [team]..."
   - RESULT: "Delivered [project] using the new technology, resulting in [benefit]..."

YOUR SPECIFIC ACHIEVEMENTS TO DISCUSS:
{{ achievements }}

SECTION 4: YOUR CV-BASED QUESTIONS
--------------------------------------------------

1. "Can you tell me more about your experience at [most recent company]?"
   PREPARED ANSWER: [Prepare a 2-minute summary highlighting key achievements]

2. "I see you worked on [specific project from CV]. What was your role?"
   PREPARED ANSWER: [Detail your specific contributions and technologies used]

3. "Why are you looking to leave your current position?"
   PREPARED ANSWER: "I'm seeking new challenges in [specific area] and this role at {{ company }} aligns with my career goals."

SECTION 5: QUESTIONS TO ASK THE INTERVIEWER
--------------------------------------------------

TECHNICAL QUESTIONS:
- "What are the biggest technical challenges the team is facing?"
- "What does the typical development workflow look like?"
- "How does the team handle technical debt?"

CULTURE & GROWTH QUESTIONS:
- "What opportunities for professional development are available?"
- "Can you describe the team dynamics and collaboration style?"

ROLE-SPECIFIC QUESTIONS:
- "What would success look like in the first 6 months in this role?"
- "What are the key projects I would be working on initially?"

SECTION 6: TECHNICAL ASSESSMENT PREPARATION
--------------------------------------------------

KEY CONCEPTS TO REVIEW:
{{ review_topics }}

PRACTICE EXERCISES:
- Whiteboard coding: Practice explaining your thought process
- System design: Be prepared to design a [relevant system type]
- Code review: Practice reviewing sample code for best practices

FINAL PREPARATION CHECKLIST:
[X] Research company recent news and projects
[X] Review job description thoroughly
[X] Practice explaining your key achievements
[X] Prepare 5+ intelligent questions to ask
[X] Review technical fundamentals
[X] Prepare examples of past successes
"#
)]
struct InterviewGuideTemplate<'a> {
    generated_on: &'a str,
    company: &'a str,
    position: &'a str,
    technical_requirements: String,
    experience_level: String,
    qualifications: String,
    soft_skills: String,
    first_skill: &'a str,
    second_skill: &'a str,
    achievements: String,
    review_topics: String,
}

pub struct DocumentComposer {
    tool_terms: Vec<String>,
}

impl Default for DocumentComposer {
    fn default() -> Self {
        Self {
            tool_terms: DEFAULT_TOOLS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl DocumentComposer {
    /// Tool suggestions come from the vocabulary's `tools` category when it has one.
    pub fn new(vocabulary: &Vocabulary) -> Self {
        vocabulary
            .skill_categories
            .iter()
            .find(|category| category.name == TOOLS_CATEGORY)
            .map(|category| Self {
                tool_terms: category.terms.clone(),
            })
            .unwrap_or_default()
    }

    pub fn compose(
        &self,
        kind: DocumentKind,
        analysis: &ApplicationAnalysis,
        generated_at: NaiveDateTime,
    ) -> Result<String> {
        debug!("Composing {} document", kind);
        let generated_on = generated_at.format("%Y-%m-%d %H:%M").to_string();

        let content = match kind {
            DocumentKind::CvImprovements => self.cv_report(analysis, &generated_on).render()?,
            DocumentKind::LinkedinSuggestions => linkedin(analysis, &generated_on).render()?,
            DocumentKind::MotivationLetter => {
                motivation_letter(analysis, &generated_on, generated_at).render()?
            }
            DocumentKind::InterviewPreparation => interview_guide(analysis, &generated_on).render()?,
        };

        Ok(content)
    }

    pub fn compose_all(
        &self,
        analysis: &ApplicationAnalysis,
        generated_at: NaiveDateTime,
    ) -> Result<Vec<ComposedDocument>> {
        DocumentKind::ALL
            .iter()
            .map(|&kind| {
                Ok(ComposedDocument {
                    kind,
                    content: self.compose(kind, analysis, generated_at)?,
                })
            })
            .collect()
    }

    fn cv_report<'a>(&self, analysis: &'a ApplicationAnalysis, generated_on: &'a str) -> CvReportTemplate<'a> {
        let requirements = &analysis.requirements;
        let gaps = &analysis.gaps;
        let skills = &requirements.skills;

        let tool_additions: Vec<String> = skills
            .iter()
            .filter(|skill| self.tool_terms.contains(*skill))
            .take(3)
            .cloned()
            .collect();

        CvReportTemplate {
            generated_on,
            match_percentage: analysis.cv_match.match_percentage,
            strategy: improvement_strategy(analysis.cv_match.match_percentage),
            exact_matches: join_or(&requirement_names(&analysis.cv_match.matched), "None"),
            partial_matches: join_or(&partial_labels(&analysis.cv_match), "None"),
            missing_skills: join_or(&analysis.cv_match.missing, "None"),
            must_have: join_or(first(skills, 8), "Not specified"),
            experience_required: join_or(&requirements.experience_phrases, "Not specified"),
            qualifications: join_or(&requirements.qualifications, "Not specified"),
            skills_length: gaps.skills_section_length,
            add_skills: bullets_or(first(&gaps.missing_from_skills_section, 8), "None, your skills section covers the requirements"),
            emphasize_skills: bullets_or(
                first(&gaps.present_in_skills_section, 5),
                "No matching skills found in your current CV",
            ),
            experience_length: gaps.experience_section_length,
            experience_gaps: bullets_or(&gaps.experience_gaps, "No gaps detected"),
            summary_length: gaps.summary_section_length,
            summary_improvements: bullets_or(&gaps.summary_improvements, "No changes required"),
            achievements: achievements_block(&analysis.achievements, skills),
            keywords: join_or(first(skills, 10), "Not specified"),
            summary_template: summary_template(analysis),
            technical_additions: join_or(first(&gaps.missing_from_skills_section, 5), "None"),
            tool_additions: join_or(&tool_additions, "None"),
            first_skill: nth_or(skills, 0, "relevant technologies"),
            second_skill: nth_or(skills, 1, "key technologies"),
        }
    }
}

fn linkedin<'a>(analysis: &'a ApplicationAnalysis, generated_on: &'a str) -> LinkedinTemplate<'a> {
    let skills = &analysis.requirements.skills;
    let about = analysis.profile.about_text();

    let (profile_percentage, skills_to_add) = match &analysis.profile_match {
        Some(result) => (result.match_percentage, result.missing.clone()),
        None => (0, analysis.cv_match.missing.clone()),
    };

    let headline_skills = first(skills, 3);
    let headline = if headline_skills.is_empty() {
        analysis.position_name.clone()
    } else {
        format!("{} | {}", analysis.position_name, headline_skills.join(" | "))
    };

    let resume_skills: Vec<String> = analysis.cv_match.covered_requirements().map(str::to_string).collect();

    LinkedinTemplate {
        generated_on,
        position: &analysis.position_name,
        company: &analysis.company_name,
        has_about: about.is_some(),
        about_length: about.map(|a| a.chars().count()).unwrap_or(0),
        profile_percentage,
        profile_skills: join_or(analysis.profile_skills.as_deref().unwrap_or_default(), "None"),
        profile_url: analysis.profile.url.as_deref().unwrap_or("[Add your LinkedIn profile URL]"),
        resume_skills: bullets_or(&resume_skills, "No job skills found in your CV yet"),
        skills_to_add: bullets_or(&skills_to_add, "None, every required skill is covered"),
        headline,
        featured: bullets_or(first(&analysis.achievements, 3), "Add quantifiable achievements from your CV"),
        about_rewrite: summary_template(analysis),
    }
}

fn motivation_letter<'a>(
    analysis: &'a ApplicationAnalysis,
    generated_on: &'a str,
    generated_at: NaiveDateTime,
) -> MotivationLetterTemplate<'a> {
    let skills = &analysis.requirements.skills;

    MotivationLetterTemplate {
        generated_on,
        letter_date: generated_at.format("%B %d, %Y").to_string(),
        profile_url: analysis.profile.url.as_deref().unwrap_or("[LinkedIn Profile]"),
        company: &analysis.company_name,
        company_upper: analysis.company_name.to_uppercase(),
        position: &analysis.position_name,
        top_three: join_or(first(skills, 3), "the core technologies of this role"),
        top_five: join_or(first(skills, 5), "the technologies listed in the job description"),
        sixth_skill: nth_or(skills, 5, "relevant technologies"),
        experience_line: match analysis.requirements.first_experience() {
            Some(phrase) => format!("delivering projects with {} of hands-on experience", phrase),
            None => "the key responsibilities mentioned".to_string(),
        },
        achievements: bullets_or(
            first(&analysis.achievements, 3),
            "[Add a quantifiable achievement relevant to this role]",
        ),
        first_skill: nth_or(skills, 0, "your technology stack"),
        second_skill: nth_or(skills, 1, "relevant areas"),
    }
}

fn interview_guide<'a>(analysis: &'a ApplicationAnalysis, generated_on: &'a str) -> InterviewGuideTemplate<'a> {
    let requirements = &analysis.requirements;
    let skills = &requirements.skills;

    let technical_requirements: Vec<String> = first(skills, 8)
        .iter()
        .map(|skill| format!("{}: Must-have skill", skill.to_uppercase()))
        .collect();
    let review_topics: Vec<String> = first(skills, 5)
        .iter()
        .map(|skill| {
            format!(
                "{}: Review fundamentals, advanced concepts, and practical applications",
                skill.to_uppercase()
            )
        })
        .collect();

    InterviewGuideTemplate {
        generated_on,
        company: &analysis.company_name,
        position: &analysis.position_name,
        technical_requirements: bullets_or(&technical_requirements, "No specific technologies listed"),
        experience_level: join_or(&requirements.experience_phrases, "Not specified"),
        qualifications: join_or(&requirements.qualifications, "Not specified"),
        soft_skills: join_or(first(&requirements.soft_skills, 5), "Not specified"),
        first_skill: nth_or(skills, 0, "key technologies"),
        second_skill: nth_or(skills, 1, "your primary technology"),
        achievements: bullets_or(
            first(&analysis.achievements, 5),
            "[Prepare two or three quantified accomplishments]",
        ),
        review_topics: bullets_or(&review_topics, "Review the fundamentals of the role"),
    }
}

fn summary_template(analysis: &ApplicationAnalysis) -> String {
    let skills = first(&analysis.requirements.skills, 3);
    let experience = analysis.requirements.first_experience().unwrap_or("X years");

    format!(
        "Results-driven professional with {} of experience in {}.\n\
         Proven track record of delivering successful projects and solutions.\n\
         Seeking to leverage expertise in {} to contribute to {} as {}.",
        experience,
        join_or(skills, "the core technologies of the role"),
        nth_or(skills, 0, "relevant technologies"),
        analysis.company_name,
        analysis.position_name
    )
}

fn achievements_block(achievements: &[String], skills: &[String]) -> String {
    if achievements.is_empty() {
        return [
            "- ADD: Quantifiable achievements with metrics",
            "- INCLUDE: Specific projects and outcomes",
            "- HIGHLIGHT: Business impact of your work",
        ]
        .join("\n");
    }

    format!(
        "EXISTING ACHIEVEMENTS TO EMPHASIZE:\n{}\n\nADDITIONAL ACHIEVEMENTS TO INCLUDE:\n\
         - Projects using {}\n- Leadership experiences\n- Problem-solving examples",
        bullets(first(achievements, 3)),
        nth_or(skills, 0, "relevant technologies")
    )
}

fn requirement_names(pairs: &[SkillPair]) -> Vec<String> {
    pairs.iter().map(|pair| pair.requirement.clone()).collect()
}

fn partial_labels(result: &MatchResult) -> Vec<String> {
    result
        .partial
        .iter()
        .map(|pair| format!("{} (via {})", pair.requirement, pair.candidate))
        .collect()
}

fn first(items: &[String], n: usize) -> &[String] {
    &items[..items.len().min(n)]
}

fn nth_or<'a>(items: &'a [String], index: usize, fallback: &'a str) -> &'a str {
    items.get(index).map(String::as_str).unwrap_or(fallback)
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bullets_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        format!("- {}", fallback)
    } else {
        bullets(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::{ApplicationAnalyzer, ApplicationInput, ProfileInput};
    use chrono::NaiveDate;

    const RESUME: &str = "Jane Roe\nSummary\nBackend engineer.\nExperience\nIncreased throughput by 40%.\nSkills\nPython, AWS, JavaScript\n";
    const JOB: &str = "Senior Backend Engineer\nJoin us at Globex Corporation. You need Python, AWS, Java, Git and Docker, 5+ years.";

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn analysis(about: Option<&str>) -> (ApplicationAnalysis, DocumentComposer) {
        let analyzer = ApplicationAnalyzer::new(Vocabulary::builtin().unwrap()).unwrap();
        let input = ApplicationInput {
            resume_text: RESUME.to_string(),
            job_text: JOB.to_string(),
            profile: ProfileInput {
                url: Some("https://linkedin.com/in/janeroe".to_string()),
                about: about.map(str::to_string),
            },
        };
        (analyzer.analyze(&input), DocumentComposer::new(analyzer.vocabulary()))
    }

    #[test]
    fn test_strategy_bands() {
        assert!(improvement_strategy(100).starts_with("FINE-TUNE"));
        assert!(improvement_strategy(80).starts_with("FINE-TUNE"));
        assert!(improvement_strategy(79).starts_with("TARGETED"));
        assert!(improvement_strategy(50).starts_with("TARGETED"));
        assert!(improvement_strategy(49).starts_with("MAJOR"));
    }

    #[test]
    fn test_cv_report_content() {
        let (analysis, composer) = analysis(None);
        let report = composer
            .compose(DocumentKind::CvImprovements, &analysis, timestamp())
            .unwrap();

        assert!(report.starts_with("CV MODIFICATION REQUIREMENTS FOR JOB APPLICATION\nGenerated on: 2024-03-05 14:30\n"));
        assert!(report.contains("MATCH SCORE: 60%"));
        assert!(report.contains("STRATEGY: TARGETED UPDATES"));
        assert!(report.contains("Partial matches: java (via javascript)"));
        assert!(report.contains("Missing skills: docker, git"));
        assert!(report.contains("- Experience Required: 5+ years"));
        assert!(report.contains("Tools: docker, git"));
        assert!(report.contains("- Increased throughput by 40%"));
        assert!(report.contains("[X] Update skills section with missing keywords"));
    }

    #[test]
    fn test_linkedin_variants() {
        let (without_about, composer) = analysis(None);
        let text = composer
            .compose(DocumentKind::LinkedinSuggestions, &without_about, timestamp())
            .unwrap();
        assert!(text.contains("PROFILE: https://linkedin.com/in/janeroe"));
        assert!(text.contains("SKILLS TO LIST ON YOUR PROFILE"));
        assert!(!text.contains("ABOUT SECTION ANALYSIS"));

        let (with_about, composer) = analysis(Some("I ship Docker and Git tooling."));
        let text = composer
            .compose(DocumentKind::LinkedinSuggestions, &with_about, timestamp())
            .unwrap();
        assert!(text.contains("ABOUT SECTION ANALYSIS"));
        assert!(text.contains("- Profile match: 40%"));
        assert!(text.contains("- Skills already in your About: docker, git"));
        assert!(text.contains("HEADLINE SUGGESTION:\nSenior Backend Engineer | python | java | aws"));
    }

    #[test]
    fn test_motivation_letter_names_company_and_date() {
        let (analysis, composer) = analysis(None);
        let letter = composer
            .compose(DocumentKind::MotivationLetter, &analysis, timestamp())
            .unwrap();

        assert!(letter.contains("March 05, 2024"));
        assert!(letter.contains("Subject: Application for Senior Backend Engineer Position"));
        assert!(letter.contains("WHAT I BRING TO GLOBEX CORPORATION:"));
        assert!(letter.contains("- Proficient in python, java, aws, docker, git"));
    }

    #[test]
    fn test_interview_guide_sections() {
        let (analysis, composer) = analysis(None);
        let guide = composer
            .compose(DocumentKind::InterviewPreparation, &analysis, timestamp())
            .unwrap();

        for section in 1..=6 {
            assert!(guide.contains(&format!("SECTION {}:", section)));
        }
        assert!(guide.contains("- PYTHON: Must-have skill"));
        assert!(guide.contains("1. \"Describe your experience with python\""));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let (analysis, composer) = analysis(Some("Rust and Go."));
        let first = composer.compose_all(&analysis, timestamp()).unwrap();
        let second = composer.compose_all(&analysis, timestamp()).unwrap();

        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
        let kinds: Vec<_> = first.iter().map(|doc| doc.kind).collect();
        assert_eq!(kinds, DocumentKind::ALL.to_vec());
    }

    #[test]
    fn test_empty_analysis_uses_fallbacks() {
        let analyzer = ApplicationAnalyzer::new(Vocabulary::builtin().unwrap()).unwrap();
        let analysis = analyzer.analyze(&ApplicationInput::default());
        let composer = DocumentComposer::default();

        let report = composer
            .compose(DocumentKind::CvImprovements, &analysis, timestamp())
            .unwrap();
        assert!(report.contains("MATCH SCORE: 0%"));
        assert!(report.contains("- Must-have Skills: Not specified"));
        assert!(report.contains("- ADD: Quantifiable achievements with metrics"));

        let letter = composer
            .compose(DocumentKind::MotivationLetter, &analysis, timestamp())
            .unwrap();
        assert!(letter.contains("position at [Company Name]"));
    }
}
