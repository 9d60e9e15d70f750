use seed::{prelude::*, *};
use shared::{ApiConfig, ApiResult, Directory, Employee, RemoteClient};

mod employee_form;
mod employee_table;
mod transport;

pub type Client = RemoteClient<transport::SeedTransport>;

// ------ ------
//     Init
// ------ ------

fn init(_: Url, orders: &mut impl Orders<Msg>) -> Model {
    let mut model = Model {
        directory: Directory::new(),
        client: RemoteClient::new(ApiConfig::default(), transport::SeedTransport),
    };
    model.directory.begin_load();

    let client = model.client.clone();
    orders.perform_cmd(async move {
        Msg::EmployeesFetched(shared::employees::fetch_employees(&client).await)
    });
    model
}

// ------ ------
//     Model
// ------ ------

struct Model {
    directory: Directory,
    client: Client,
}

// ------ ------
//    Update
// ------ ------

enum Msg {
    EmployeesFetched(ApiResult<Vec<Employee>>),
    Form(employee_form::Msg),
    Table(employee_table::Msg),
}

fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::EmployeesFetched(result) => {
            if let Err(err) = &result {
                error!("could not load employees:", err.to_string());
            }
            model.directory.finish_load(result);
        }
        Msg::Form(msg) => {
            employee_form::update(
                msg,
                &mut model.directory,
                &model.client,
                &mut orders.proxy(Msg::Form),
            );
        }
        Msg::Table(msg) => {
            employee_table::update(
                msg,
                &mut model.directory,
                &model.client,
                &mut orders.proxy(Msg::Table),
            );
        }
    }
}

// ------ ------
//     View
// ------ ------

fn view(model: &Model) -> impl IntoNodes<Msg> {
    let store = &model.directory.store;
    div![
        style! {
            St::FontFamily => "sans-serif";
            St::MaxWidth => px(1000);
            St::Margin => "auto";
        },
        IF!(store.show_error_banner() => div![
            C!["alert alert-danger mt-1"],
            "Something went wrong"
        ]),
        if store.show_loading() {
            nodes![spinner()]
        } else {
            nodes![
                employee_form::view(&model.directory).map_msg(Msg::Form),
                store.employees().map(|employees| {
                    employee_table::view(employees, &model.directory.selection).map_msg(Msg::Table)
                }),
            ]
        }
    ]
}

fn spinner<Ms>() -> Node<Ms> {
    div![
        C!["spinner-border text-secondary"],
        span![C!["sr-only"], "Loading..."],
    ]
}

/// Error notice with a close button.
fn alert<Ms: 'static>(text: &str, on_close: fn() -> Ms) -> Node<Ms> {
    div![
        C!["alert alert-danger d-flex justify-content-between mb-2"],
        span![text],
        button![
            C!["close"],
            attrs! {At::Type => "button"},
            ev(Ev::Click, move |_| on_close()),
            "×"
        ],
    ]
}

//     Start
// ------ ------

#[wasm_bindgen(start)]
pub fn start() {
    App::start("app", init, update, view);
}
