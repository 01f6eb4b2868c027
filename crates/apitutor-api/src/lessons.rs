//! Lesson payloads
//!
//! Every learner-facing response is a lesson: a greeting, optional data, and
//! a tutorial explaining what just happened and what to try next. The texts
//! are written for the Postman collection the API is taught with.

use apitutor_core::config::TutorConfig;
use apitutor_core::models::{Customer, CustomerSummary};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Response body for learner routes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub welcome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub tutorial: Tutorial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutorial {
    pub title: String,
    pub intro: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next: Vec<NextStep>,
}

/// Explanation of the current response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<Value>,
}

/// What the learner should do after this request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextStep {
    pub step: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<Value>,
}

impl Step {
    fn note(note: impl Into<String>) -> Self {
        Self {
            note: note.into(),
            pic: None,
            raw_data: None,
        }
    }

    fn with_data(mut self, raw_data: Value) -> Self {
        self.raw_data = Some(raw_data);
        self
    }
}

impl NextStep {
    fn step(step: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            pic: None,
            raw_data: None,
        }
    }
}

impl Tutorial {
    fn new(title: impl Into<String>, intro: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            intro: intro.into(),
            steps: Vec::new(),
            next: Vec::new(),
        }
    }

    fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    fn then(mut self, next: impl Into<String>) -> Self {
        self.next.push(NextStep::step(next));
        self
    }
}

const PATH_PARAM_NOTE: &str = "This request includes a path parameter with `/:customer_id` at the end of the \
     request address - open **Params** and replace `placeholder` with the `id` of a customer you added when \
     you sent the `POST` request. Copy the `id` from the response in the `Get all customers` request.";

const BODY_NOTE: &str = "In **Body** select **raw** and choose **JSON** instead of `Text` in the drop-down \
     list. Enter the following JSON data including the enclosing curly braces:";

const ID_PARAM_NEXT: &str = "With your parameter in place (you'll see e.g. `?id=abc123` added to the \
     request address), click **Send** again.";

/// Builds lessons for one deployment
#[derive(Debug, Clone)]
pub struct Lessons {
    project: String,
    project_domain: String,
    welcome: String,
}

impl Lessons {
    pub fn new(tutor: &TutorConfig) -> Self {
        Self {
            project: tutor.project.clone(),
            project_domain: tutor.project_domain.clone(),
            welcome: tutor.welcome_message(),
        }
    }

    fn lesson(&self, tutorial: Tutorial) -> Lesson {
        Lesson {
            welcome: self.welcome.clone(),
            data: None,
            tutorial,
        }
    }

    fn lesson_with_data(&self, data: Value, tutorial: Tutorial) -> Lesson {
        Lesson {
            welcome: self.welcome.clone(),
            data: Some(data),
            tutorial,
        }
    }

    // ==================== Landing ====================

    pub fn landing(&self) -> Lesson {
        let mut intro = format!(
            "Use the {project} template in Postman to learn API basics! Import the collection in \
             Postman by clicking New > Templates, and searching for '{project}'. Open the first \
             request in the collection and click Send.",
            project = self.project
        );
        if !self.project_domain.is_empty() {
            intro.push_str(&format!(
                " To see the API code navigate to https://glitch.com/edit/#!/{} in your web browser!",
                self.project_domain
            ));
        }

        self.lesson(Tutorial::new(self.project.clone(), intro))
    }

    /// Page shown to browsers
    pub fn landing_html(&self) -> String {
        format!(
            "<h1>{}</h1><p>Oh, hi! There's not much to see here - view the code instead:</p>",
            escape_html(&self.project)
        )
    }

    // ==================== Shared refusals ====================

    pub fn unauthorized(&self) -> Lesson {
        self.lesson(
            Tutorial::new(
                "Your request is unauthorized! 🚫",
                "This endpoint requires authorization.",
            )
            .step(Step::note(
                "In **Auth** select **API Key** from the drop-down, enter `auth_key` as the **Key** \
                 and any text you like as the **Value**. Make sure you are adding to the **Header**.",
            ))
            .then("With your auth key in place, click **Send** again."),
        )
    }

    pub fn invalid_route(&self) -> Lesson {
        self.lesson(Tutorial::new(
            "Your request is invalid! 🚧",
            "Oops this isn't a valid endpoint! Try undoing your changes or closing the request \
             without saving and opening it again from the collection on the left of Postman.",
        ))
    }

    // ==================== Reads ====================

    pub fn customer_list(&self, customers: &[CustomerSummary]) -> Lesson {
        self.list_lesson(json!({ "customers": customers }))
    }

    /// Same lesson as the learner list, with owners included
    pub fn all_customers(&self, customers: &[Customer]) -> Lesson {
        self.list_lesson(json!({ "customers": customers }))
    }

    fn list_lesson(&self, data: Value) -> Lesson {
        self.lesson_with_data(
            data.clone(),
            Tutorial::new(
                "You sent a request! 🚀",
                "Your request used `GET` method and sent to the `/customers` path.",
            )
            .step(
                Step::note("The API returned JSON data including an array of customers:")
                    .with_data(data),
            )
            .then(
                "Now open the next `GET` request in the collection `Get one customer` and click **Send**.",
            ),
        )
    }

    pub fn customer(&self, customer: &CustomerSummary) -> Lesson {
        let data = json!({ "customer": customer });
        self.lesson_with_data(
            data.clone(),
            Tutorial::new(
                "You sent a request with a query parameter! 🎉",
                "Your request used the `id` parameter to retrieve a specific customer.",
            )
            .step(
                Step::note("The API returned a JSON object representing the customer:")
                    .with_data(data),
            )
            .then("Now open the next request in the collection `POST Add new customer` and click **Send**."),
        )
    }

    pub fn missing_customer_id(&self) -> Lesson {
        self.lesson(
            Tutorial::new(
                "Your request is missing some info! 😕",
                "This endpoint requires you to specify a customer.",
            )
            .step(Step::note(
                "In **Params** add `id` in the **Key** column, and one of the `id` values from the \
                 customer list as the **Value**.",
            ))
            .then(ID_PARAM_NEXT),
        )
    }

    pub fn unknown_customer(&self) -> Lesson {
        self.lesson(
            Tutorial::new(
                "Your request contains invalid info! 😕",
                "This endpoint requires the `id` for a valid customer.",
            )
            .step(Step::note(
                "In **Params** add `id` in the **Key** column, and the ID of any customer you see \
                 in the array when you send the `Get all customers` request.",
            ))
            .then(ID_PARAM_NEXT),
        )
    }

    // ==================== Create ====================

    pub fn created(&self, customer: &CustomerSummary) -> Lesson {
        self.lesson_with_data(
            json!({ "customer": customer }),
            Tutorial::new(
                "You added a new customer! 🏅",
                "Your new customer was added to the database.",
            )
            .step(Step::note(
                "Go back into the first request you opened `Get all customers` and **Send** it again \
                 before returning here - you should see your new addition in the array! _Note that this \
                 will only work if you're using the Postman template._",
            ))
            .then("Next open the `PUT Update customer` request and click **Send**."),
        )
    }

    pub fn create_incomplete(&self) -> Lesson {
        self.incomplete_body(
            "This endpoint requires body data representing the new customer.",
            "Dorothy Zbornak",
        )
    }

    // ==================== Update ====================

    pub fn updated(&self) -> Lesson {
        self.lesson(
            Tutorial::new("You updated a customer! ✅", "Your customer was updated in the database.")
                .step(Step::note(
                    "Go back into the first request you opened `Get all customers` and **Send** it \
                     again before returning here - you should see your updated customer in the array!",
                ))
                .then("Next open the `DEL Remove customer` request and click **Send**."),
        )
    }

    pub fn update_incomplete(&self) -> Lesson {
        self.incomplete_body(
            "This endpoint requires body data representing the updated customer details.",
            "Sophia Petrillo",
        )
    }

    pub fn update_placeholder(&self) -> Lesson {
        self.placeholder_id("update")
    }

    pub fn update_refused(&self) -> Lesson {
        self.ownership_refusal("update")
    }

    // ==================== Delete ====================

    pub fn deleted(&self) -> Lesson {
        self.lesson(
            Tutorial::new("You deleted a customer! 🏆", "Your customer was removed from the database.")
                .step(Step::note(
                    "Go back into the first request you opened `Get all customers` and **Send** it \
                     again before returning here - you should see that your deleted customer is no \
                     longer in the array!",
                ))
                .then(format!(
                    "🚀 You completed the first folder in the {} collection! Check out the next folder!",
                    self.project
                )),
        )
    }

    pub fn delete_placeholder(&self) -> Lesson {
        self.placeholder_id("remove")
    }

    pub fn delete_refused(&self) -> Lesson {
        self.ownership_refusal("remove")
    }

    // ==================== Shared shapes ====================

    fn incomplete_body(&self, intro: &str, sample_name: &str) -> Lesson {
        self.lesson(
            Tutorial::new("Your request is incomplete! ✋", intro)
                .step(
                    Step::note(BODY_NOTE)
                        .with_data(json!({ "name": sample_name, "type": "Individual" })),
                )
                .then("With your body data in place, click **Send** again."),
        )
    }

    /// `verb` is "update" or "remove"
    fn placeholder_id(&self, verb: &str) -> Lesson {
        self.lesson(
            Tutorial::new(
                "Your request is incomplete! ✋",
                format!("This endpoint requires an ID representing the customer to {}.", verb),
            )
            .step(Step::note(format!(
                "{} ***You can only {} a customer you added.***",
                PATH_PARAM_NOTE, verb
            )))
            .then("With your customer ID parameter in place, click **Send** again."),
        )
    }

    fn ownership_refusal(&self, verb: &str) -> Lesson {
        self.lesson(
            Tutorial::new(
                "Your request is invalid! ⛔",
                format!(
                    "You can only {} customers you added using the `POST` method during the current \
                     session (and that haven't been deleted).",
                    verb
                ),
            )
            .step(Step::note(format!(
                "{} ***You can only {} a customer you added.***",
                PATH_PARAM_NOTE, verb
            )))
            .then(
                "With the ID parameter for a customer _you added_ during this session in place, \
                 click **Send** again.",
            ),
        )
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lessons() -> Lessons {
        Lessons::new(&TutorConfig {
            project: "postman-customers".to_string(),
            project_domain: "postman-customers".to_string(),
            admin_secret: None,
        })
    }

    #[test]
    fn test_welcome_names_project() {
        let lesson = lessons().unauthorized();
        assert!(lesson.welcome.contains("postman-customers training course"));
    }

    #[test]
    fn test_optional_parts_are_omitted() {
        let value = serde_json::to_value(lessons().invalid_route()).unwrap();
        assert!(value.get("data").is_none());
        assert!(value["tutorial"].get("steps").is_none());
        assert!(value["tutorial"].get("next").is_none());

        let value = serde_json::to_value(lessons().unauthorized()).unwrap();
        assert!(value["tutorial"]["steps"][0].get("pic").is_none());
        assert_eq!(
            value["tutorial"]["next"][0]["step"],
            "With your auth key in place, click **Send** again."
        );
    }

    #[test]
    fn test_list_lesson_repeats_data_in_step() {
        let customers = vec![CustomerSummary {
            id: "abc123".to_string(),
            name: "Rose Nylund".to_string(),
            customer_type: "Individual".to_string(),
        }];
        let lesson = lessons().customer_list(&customers);

        let data = lesson.data.clone().unwrap();
        assert_eq!(data["customers"][0]["type"], "Individual");
        assert_eq!(lesson.tutorial.steps[0].raw_data, Some(data));
    }

    #[test]
    fn test_incomplete_body_shows_sample() {
        let create = lessons().create_incomplete();
        assert_eq!(
            create.tutorial.steps[0].raw_data,
            Some(json!({ "name": "Dorothy Zbornak", "type": "Individual" }))
        );

        let update = lessons().update_incomplete();
        assert_eq!(
            update.tutorial.steps[0].raw_data,
            Some(json!({ "name": "Sophia Petrillo", "type": "Individual" }))
        );
    }

    #[test]
    fn test_refusals_name_the_verb() {
        assert!(lessons().update_refused().tutorial.intro.contains("only update"));
        assert!(lessons().delete_refused().tutorial.intro.contains("only remove"));
        assert!(lessons()
            .delete_placeholder()
            .tutorial
            .intro
            .ends_with("customer to remove."));
    }

    #[test]
    fn test_landing() {
        let lesson = lessons().landing();
        assert_eq!(lesson.tutorial.title, "postman-customers");
        assert!(lesson
            .tutorial
            .intro
            .contains("https://glitch.com/edit/#!/postman-customers"));

        let bare = Lessons::new(&TutorConfig::default()).landing();
        assert!(!bare.tutorial.intro.contains("glitch.com"));
    }

    #[test]
    fn test_landing_html_escapes_project() {
        let lessons = Lessons::new(&TutorConfig {
            project: "<b>Tutor</b>".to_string(),
            ..TutorConfig::default()
        });
        assert!(lessons.landing_html().starts_with("<h1>&lt;b&gt;Tutor&lt;/b&gt;</h1>"));
    }
}
