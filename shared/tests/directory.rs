use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use shared::{
    ApiConfig, Directory, Employee, EmployeeId, Field, FormMessage, HttpResponse, LoadPhase,
    MemoryTransport, Method, RemoteClient, SubmitOutcome,
};

fn employee(id: EmployeeId) -> Employee {
    Employee {
        id,
        name: format!("Name{}", id),
        surname: format!("Surname{}", id),
        age: 20 + id as u32,
        salary: 1500.0,
        position: "Clerk".to_string(),
        email: format!("clerk{}@example.com", id),
    }
}

/// Tiny stand-in for the JSON service: answers from a shared list and fails
/// deletes for the ids in `failing`.
struct FakeServer {
    employees: Rc<RefCell<Vec<Employee>>>,
    failing: BTreeSet<EmployeeId>,
    reject_posts: bool,
}

impl FakeServer {
    fn new(ids: &[EmployeeId]) -> Self {
        FakeServer {
            employees: Rc::new(RefCell::new(ids.iter().map(|id| employee(*id)).collect())),
            failing: BTreeSet::new(),
            reject_posts: false,
        }
    }

    fn client(self) -> RemoteClient<MemoryTransport> {
        let FakeServer {
            employees,
            failing,
            reject_posts,
        } = self;
        let transport = MemoryTransport::new(move |request| {
            let path = request
                .url
                .trim_start_matches("http://directory.test")
                .to_string();
            let response = match (request.method, path.as_str()) {
                (Method::Get, "/employees") => {
                    HttpResponse::new(200, serde_json::to_string(&*employees.borrow()).unwrap())
                }
                (Method::Post, "/employees") if reject_posts => HttpResponse::new(500, "nope"),
                (Method::Post, "/employees") => {
                    let body = request.body.clone().unwrap_or_default();
                    HttpResponse::new(201, body)
                }
                (Method::Delete, path) => {
                    let id: EmployeeId = path.rsplit('/').next().unwrap().parse().unwrap();
                    if failing.contains(&id) {
                        HttpResponse::new(404, "{}")
                    } else {
                        HttpResponse::new(200, "{}")
                    }
                }
                _ => HttpResponse::new(405, ""),
            };
            Ok(response)
        });
        RemoteClient::new(ApiConfig::new("http://directory.test"), transport)
    }
}

fn fill(directory: &mut Directory) {
    let values = [
        (Field::Name, "Grace"),
        (Field::Surname, "Hopper"),
        (Field::Age, "45"),
        (Field::Salary, "9000"),
        (Field::Position, "Admiral"),
        (Field::Email, "grace@navy.mil"),
    ];
    for (field, value) in values.iter() {
        directory.form.input(*field, value.to_string());
        directory.form.blur(*field);
    }
}

fn ids(directory: &Directory) -> Vec<EmployeeId> {
    directory
        .store
        .employees()
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect()
}

#[tokio::test]
async fn load_then_add_employee() {
    let client = FakeServer::new(&[1, 3, 7]).client();
    let mut directory = Directory::new();
    assert_eq!(directory.store.phase(), LoadPhase::Idle);

    directory.run_load(&client).await;
    assert_eq!(directory.store.phase(), LoadPhase::Loaded);
    assert_eq!(ids(&directory), vec![1, 3, 7]);

    fill(&mut directory);
    let outcome = directory.run_submit(&client).await;

    assert!(matches!(outcome, SubmitOutcome::Dispatch(ref e) if e.id == 8));
    let posts = client
        .transport()
        .requests()
        .into_iter()
        .filter(|r| r.method == Method::Post)
        .count();
    assert_eq!(posts, 1);

    let list = directory.store.employees().unwrap();
    assert_eq!(list.len(), 4);
    let added = list.last().unwrap();
    assert_eq!(added.id, 8);
    assert_eq!(added.name, "Grace");
    assert_eq!(added.surname, "Hopper");
    assert_eq!(added.age, 45);
    assert_eq!(added.salary, 9000.0);
    assert_eq!(added.position, "Admiral");
    assert_eq!(added.email, "grace@navy.mil");
    assert_eq!(directory.form.value(Field::Name), "");
}

#[tokio::test]
async fn invalid_input_sends_nothing() {
    let client = FakeServer::new(&[1]).client();
    let mut directory = Directory::new();
    directory.run_load(&client).await;

    fill(&mut directory);
    directory.form.input(Field::Email, "not-an-email".into());
    directory.form.blur(Field::Email);

    let outcome = directory.run_submit(&client).await;

    assert_eq!(outcome, SubmitOutcome::Rejected(FormMessage::FixFields));
    assert_eq!(directory.form.message(), Some(FormMessage::FixFields));
    assert_eq!(client.transport().requests().len(), 1);
    assert_eq!(ids(&directory), vec![1]);
}

#[tokio::test]
async fn email_without_top_level_domain_sends_nothing() {
    let client = FakeServer::new(&[1]).client();
    let mut directory = Directory::new();
    directory.run_load(&client).await;

    fill(&mut directory);
    directory.form.input(Field::Email, "user@localhost".into());
    directory.form.blur(Field::Email);

    let outcome = directory.run_submit(&client).await;

    assert_eq!(outcome, SubmitOutcome::Rejected(FormMessage::FixFields));
    assert!(!directory.form.is_valid(Field::Email));
    assert_eq!(client.transport().requests().len(), 1);
    assert_eq!(ids(&directory), vec![1]);
}

#[tokio::test]
async fn rejected_create_keeps_list_and_clears_draft() {
    let mut server = FakeServer::new(&[1, 2]);
    server.reject_posts = true;
    let client = server.client();
    let mut directory = Directory::new();
    directory.run_load(&client).await;

    fill(&mut directory);
    directory.run_submit(&client).await;

    assert_eq!(ids(&directory), vec![1, 2]);
    assert!(directory.form.has_post_error());
    assert_eq!(directory.form.value(Field::Email), "");
    assert!(!directory.form.is_submitting());
}

#[tokio::test]
async fn delete_all_succeed() {
    let client = FakeServer::new(&[1, 2, 3, 4]).client();
    let mut directory = Directory::new();
    directory.run_load(&client).await;

    directory.selection.replace(vec![2, 4]);
    assert!(directory.run_delete(&client).await);

    let deletes = client
        .transport()
        .requests()
        .into_iter()
        .filter(|r| r.method == Method::Delete)
        .count();
    assert_eq!(deletes, 2);

    assert_eq!(ids(&directory), vec![1, 3]);
    assert!(directory.selection.is_empty());
    assert!(!directory.selection.has_delete_error());
    assert!(!directory.selection.is_deleting());
}

#[tokio::test]
async fn delete_with_one_failure_changes_nothing() {
    let mut server = FakeServer::new(&[1, 2, 3, 4]);
    server.failing.insert(3);
    let client = server.client();
    let mut directory = Directory::new();
    directory.run_load(&client).await;

    directory.selection.replace(vec![1, 3]);
    assert!(directory.run_delete(&client).await);

    assert_eq!(ids(&directory), vec![1, 2, 3, 4]);
    assert!(directory.selection.has_delete_error());
    assert!(directory.selection.is_empty());
    assert!(!directory.selection.is_deleting());
}

#[tokio::test]
async fn delete_without_selection_is_a_no_op() {
    let client = FakeServer::new(&[1]).client();
    let mut directory = Directory::new();
    directory.run_load(&client).await;

    assert!(!directory.run_delete(&client).await);
    assert_eq!(client.transport().requests().len(), 1);
}

#[tokio::test]
async fn failed_load_shows_banner_and_blocks_submit() {
    let client = RemoteClient::new(ApiConfig::default(), MemoryTransport::offline());
    let mut directory = Directory::new();

    directory.run_load(&client).await;

    assert_eq!(directory.store.phase(), LoadPhase::Failed);
    assert!(directory.store.show_error_banner());
    assert!(!directory.store.show_loading());

    fill(&mut directory);
    assert_eq!(directory.run_submit(&client).await, SubmitOutcome::NotLoaded);
    assert_eq!(client.transport().requests().len(), 1);
}
