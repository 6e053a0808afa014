// Walkthrough layer: runs the getting-started steps against a vault
// instance, narrating to stdout and asserting the shape of every
// response. The flow is strictly sequential; local variables carry ids
// between steps and nothing is persisted.

use anyhow::{bail, ensure, Context, Result};
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

use crate::api::{
    Collection, CollectionType, InputObject, ListObjectsParams, ObjectFields, Property,
    QueryToken, SearchQuery, TokenType, TokenizeRequest, VaultClient, HEALTH_PASS,
};

pub const COLLECTION_NAME: &str = "customers";
/// Access reason recorded by the vault's audit log for every data call.
pub const APP_FUNCTIONALITY_REASON: &str = "AppFunctionality";

/// A demo customer record, matching the `customers` collection schema.
#[derive(Serialize, Debug, Clone)]
pub struct Customer {
    pub ssn: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code_us: Option<String>,
}

/// A customer after insertion: the record plus the id the vault assigned.
pub struct AddedCustomer {
    pub id: String,
    pub record: Customer,
}

/// Run the full getting-started sequence. Any failed expectation aborts
/// the walkthrough with a descriptive error.
pub fn run(vault: &VaultClient) -> Result<()> {
    banner("Steps 1 + 2: Connect to the vault and check status");
    check_vault(vault)?;

    banner("Step 3: Create a collection");
    let collection = create_collection(vault)?;

    banner("Step 4: Add data");
    let customers = add_customers(vault)?;

    banner("Step 5: Tokenize data");
    let token_id = tokenize_customer(vault, &customers[0])?;

    banner("Step 6: Query your data");
    query_customers(vault, &collection, &customers)?;

    banner("Step 7: Delete data");
    delete_customer_data(vault, &token_id, &customers[0].id)?;

    println!("\nDone!");
    Ok(())
}

/// Verify both planes report healthy and the vault is empty. For safety
/// the walkthrough refuses to run over existing data; a leftover demo
/// collection from a previous run can be dropped interactively.
fn check_vault(vault: &VaultClient) -> Result<()> {
    let sp = spinner("Checking vault health...");
    let control = vault.system().control_health()?;
    let data = vault.system().data_health()?;
    sp.finish_and_clear();

    println!("control status: {}", control.status);
    println!("data status: {}", data.status);
    ensure!(
        control.status == HEALTH_PASS && data.status == HEALTH_PASS,
        "Health check failed (control: {}, data: {})",
        control.status,
        data.status
    );

    println!("Checking the vault is empty...");
    let collections = vault.collections().list_collections()?;
    if collections.is_empty() {
        return Ok(());
    }

    let only_leftover_demo =
        collections.len() == 1 && collections[0].name == COLLECTION_NAME;
    if only_leftover_demo {
        let drop_it = Confirm::new()
            .with_prompt(format!(
                "A '{COLLECTION_NAME}' collection is left over from a previous run. Delete it and continue?"
            ))
            .default(false)
            .interact()?;
        if drop_it {
            vault.collections().delete_collection(COLLECTION_NAME)?;
            println!("Deleted leftover '{COLLECTION_NAME}' collection.");
            return Ok(());
        }
    }
    bail!(
        "The vault is not empty ({} collection(s) present). \
         Please run this walkthrough against a freshly created instance.",
        collections.len()
    );
}

/// The demo schema: four PII-typed properties, ssn unique, the last two
/// nullable.
pub fn demo_collection() -> Collection {
    Collection::new(
        COLLECTION_NAME,
        CollectionType::Persons,
        vec![
            Property::new("ssn", "SSN")
                .unique()
                .description("Social security number"),
            Property::new("email", "EMAIL"),
            Property::new("phone_number", "PHONE_NUMBER").nullable(),
            Property::new("zip_code_us", "ZIP_CODE_US").nullable(),
        ],
    )
}

fn create_collection(vault: &VaultClient) -> Result<Collection> {
    println!("Adding collection {COLLECTION_NAME}...");
    let sp = spinner("Creating...");
    vault.collections().add_collection(&demo_collection())?;

    // Read it back to confirm the vault stored it.
    let collection = vault.collections().get_collection(COLLECTION_NAME)?;
    sp.finish_and_clear();

    println!(
        "Collection details:\n\tname: {}\n\ttype: {:?}\n\tproperties: {}\n\tcreation time: {}",
        collection.name,
        collection.collection_type,
        collection
            .properties
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        collection.creation_time.as_deref().unwrap_or("-"),
    );
    Ok(collection)
}

/// The three canonical demo customers.
pub fn customer_records() -> Vec<Customer> {
    let customer = |ssn: &str, email: &str, phone: &str| Customer {
        ssn: ssn.into(),
        email: email.into(),
        phone_number: Some(phone.into()),
        zip_code_us: Some("12345".into()),
    };
    vec![
        customer("123-12-1234", "john@somemail.com", "+1-121212123"),
        customer("123-12-1235", "mary@somemail.com", "+1-121212124"),
        customer("123-12-1236", "eric@somemail.com", "+1-121212125"),
    ]
}

/// Insert the demo customers and verify one can be found again by email.
fn add_customers(vault: &VaultClient) -> Result<Vec<AddedCustomer>> {
    println!("Adding objects to collection {COLLECTION_NAME}...");
    let sp = spinner("Inserting...");
    let mut customers = Vec::new();
    for record in customer_records() {
        let object_id =
            vault
                .objects()
                .add_object(COLLECTION_NAME, APP_FUNCTIONALITY_REASON, &record)?;
        customers.push(AddedCustomer {
            id: object_id.id,
            record,
        });
    }
    sp.finish_and_clear();
    for customer in &customers {
        println!("\tadded object {}", customer.id);
    }

    let email = &customers[0].record.email;
    println!("Searching for object by email ({email})...");
    let mut match_fields = ObjectFields::new();
    match_fields.insert("email".into(), email.as_str().into());
    let search = vault.objects().search_objects(
        COLLECTION_NAME,
        APP_FUNCTIONALITY_REASON,
        &SearchQuery { match_fields },
        &["id", "email"],
    )?;
    ensure!(
        !search.results.is_empty(),
        "Search by email ({email}) returned no objects"
    );
    let found_id = field_str(&search.results[0], "id")?;
    ensure!(
        found_id == customers[0].id,
        "Search returned object {found_id}, expected {}",
        customers[0].id
    );
    println!("\tfound object {found_id}");
    Ok(customers)
}

/// Tokenize the customer's email with a pointer token, find the token
/// again by object id and resolve it back to the original value.
fn tokenize_customer(vault: &VaultClient, customer: &AddedCustomer) -> Result<String> {
    println!("Tokenizing the email of object {}...", customer.id);
    let request = TokenizeRequest {
        object: InputObject {
            id: customer.id.clone(),
        },
        props: vec!["email".into()],
        token_type: TokenType::Pointer,
        tags: vec!["token_tag".into()],
    };
    let sp = spinner("Tokenizing...");
    let tokens = vault.tokens().tokenize(
        COLLECTION_NAME,
        APP_FUNCTIONALITY_REASON,
        std::slice::from_ref(&request),
    )?;
    sp.finish_and_clear();
    let token_id = tokens
        .first()
        .map(|t| t.token_id.clone())
        .context("Tokenize returned no tokens")?;
    println!("Token: {token_id}");

    let found = vault.tokens().search_tokens(
        COLLECTION_NAME,
        APP_FUNCTIONALITY_REASON,
        &token_query(&customer.id),
    )?;
    ensure!(
        !found.is_empty(),
        "No token found for object {}",
        customer.id
    );
    ensure!(
        found[0].token_id == token_id,
        "Token search returned {}, expected {token_id}",
        found[0].token_id
    );

    let detokenized = vault.tokens().detokenize(
        COLLECTION_NAME,
        APP_FUNCTIONALITY_REASON,
        std::slice::from_ref(&token_id),
    )?;
    ensure!(
        detokenized.len() == 1,
        "Detokenize returned {} entries, expected 1",
        detokenized.len()
    );
    ensure!(
        detokenized[0].token_id == token_id,
        "Detokenize returned token {}, expected {token_id}",
        detokenized[0].token_id
    );
    let email = field_str(&detokenized[0].fields, "email")?;
    ensure!(
        email == customer.record.email,
        "Detokenized email {email:?} does not match {:?}",
        customer.record.email
    );
    println!("Detokenized email: {email}");
    Ok(token_id)
}

/// Mask projections for every schema property that has one; the zip code
/// type carries no mask transformation.
pub fn mask_props(collection: &Collection) -> Vec<String> {
    collection
        .properties
        .iter()
        .filter(|p| p.name != "zip_code_us")
        .map(|p| format!("{}.mask", p.name))
        .collect()
}

/// Step 6: paginated listing, field projection, full fetch and masked
/// fetch, each with shape assertions.
fn query_customers(
    vault: &VaultClient,
    collection: &Collection,
    customers: &[AddedCustomer],
) -> Result<()> {
    let objects = vault.objects();
    let first = &customers[0];

    println!("Listing objects one page at a time...");
    let page = objects.list_objects(
        COLLECTION_NAME,
        APP_FUNCTIONALITY_REASON,
        &ListObjectsParams::new().page_size(1).all_props(),
    )?;
    ensure!(
        page.results.len() == 1,
        "Expected a single-object page, got {} objects",
        page.results.len()
    );
    ensure!(!page.paging.cursor.is_empty(), "Paging cursor is missing");
    let total = page.paging.size + page.paging.remaining_count;
    ensure!(
        total == customers.len() as u64,
        "Paging accounts for {total} objects, expected {}",
        customers.len()
    );
    let listed = &page.results[0];
    let listed_id = field_str(listed, "id")?;
    let original = customers
        .iter()
        .find(|c| c.id == listed_id)
        .with_context(|| format!("Listing returned unknown object {listed_id}"))?;
    ensure!(
        field_str(listed, "email")? == original.record.email,
        "Listed object {listed_id} has the wrong email"
    );
    println!("\tpage: {listed:?}\n\tcursor: {}", page.paging.cursor);

    println!("Fetching only the ssn of object {}...", first.id);
    let projected = objects.list_objects(
        COLLECTION_NAME,
        APP_FUNCTIONALITY_REASON,
        &ListObjectsParams::new().ids([first.id.as_str()]).props(["ssn"]),
    )?;
    ensure!(
        projected.results.len() == 1,
        "Projection query returned {} objects, expected 1",
        projected.results.len()
    );
    ensure!(
        field_str(&projected.results[0], "ssn")? == first.record.ssn,
        "Projected ssn does not match the stored value"
    );
    println!("\tssn: {}", field_str(&projected.results[0], "ssn")?);

    println!("Fetching all details of object {}...", first.id);
    let full = objects.list_objects(
        COLLECTION_NAME,
        APP_FUNCTIONALITY_REASON,
        &ListObjectsParams::new().ids([first.id.as_str()]).all_props(),
    )?;
    ensure!(
        !full.results.is_empty(),
        "Full fetch of object {} returned nothing",
        first.id
    );
    ensure!(
        field_str(&full.results[0], "email")? == first.record.email,
        "Full fetch returned the wrong email"
    );
    println!("\tobject: {:?}", full.results[0]);

    println!("Fetching object {} with masked properties...", first.id);
    let masked = objects.list_objects(
        COLLECTION_NAME,
        APP_FUNCTIONALITY_REASON,
        &ListObjectsParams::new()
            .ids([first.id.as_str()])
            .props(mask_props(collection)),
    )?;
    ensure!(
        !masked.results.is_empty(),
        "Masked fetch of object {} returned nothing",
        first.id
    );
    let fields = &masked.results[0];
    for (prop, expected) in [
        ("ssn.mask", "***-**-1234"),
        ("email.mask", "j***@somemail.com"),
        ("phone_number.mask", "*******2123"),
    ] {
        let value = field_str(fields, prop)?;
        ensure!(
            value == expected,
            "Masked value of {prop} is {value:?}, expected {expected:?}"
        );
    }
    println!("\tmasked object: {fields:?}");
    Ok(())
}

/// Delete the token and the object, verifying both are really gone.
fn delete_customer_data(vault: &VaultClient, token_id: &str, object_id: &str) -> Result<()> {
    println!("Deleting token {token_id}...");
    let token_ids = vec![token_id.to_string()];
    vault
        .tokens()
        .delete_tokens(COLLECTION_NAME, APP_FUNCTIONALITY_REASON, &token_ids)?;
    let remaining = vault.tokens().search_tokens(
        COLLECTION_NAME,
        APP_FUNCTIONALITY_REASON,
        &token_query(object_id),
    )?;
    ensure!(
        remaining.is_empty(),
        "Token {token_id} still exists after deletion"
    );

    println!("Deleting object {object_id}...");
    vault
        .objects()
        .delete_object_by_id(COLLECTION_NAME, APP_FUNCTIONALITY_REASON, object_id)?;
    match vault
        .objects()
        .get_object_by_id(COLLECTION_NAME, APP_FUNCTIONALITY_REASON, object_id, true)
    {
        Err(e) if e.is_not_found() => Ok(()),
        Ok(_) => bail!("Object {object_id} still exists after deletion"),
        Err(e) => {
            Err(anyhow::Error::from(e).context("Post-deletion lookup failed unexpectedly"))
        }
    }
}

fn token_query(object_id: &str) -> QueryToken {
    QueryToken {
        object_ids: vec![object_id.to_string()],
        ..QueryToken::default()
    }
}

/// Read a string field out of an object, with a descriptive error when
/// it is missing or not a string.
fn field_str<'a>(fields: &'a ObjectFields, name: &str) -> Result<&'a str> {
    fields
        .get(name)
        .and_then(|v| v.as_str())
        .with_context(|| format!("Response object is missing the {name:?} field"))
}

fn banner(title: &str) {
    println!("\n\n== {title} ==\n");
}

fn spinner(msg: &str) -> ProgressBar {
    let sp = ProgressBar::new_spinner();
    sp.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    sp.set_message(msg.to_string());
    sp.enable_steady_tick(Duration::from_millis(80));
    sp
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn three_canonical_customers() {
        let records = customer_records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].email, "john@somemail.com");
        assert_eq!(records[0].ssn, "123-12-1234");
        assert!(records.iter().all(|c| c.zip_code_us.as_deref() == Some("12345")));
    }

    #[test]
    fn customer_serializes_with_schema_field_names() {
        let value = serde_json::to_value(&customer_records()[1]).unwrap();
        assert_eq!(
            value,
            json!({
                "ssn": "123-12-1235",
                "email": "mary@somemail.com",
                "phone_number": "+1-121212124",
                "zip_code_us": "12345"
            })
        );
    }

    #[test]
    fn demo_schema_flags() {
        let collection = demo_collection();
        assert_eq!(collection.name, COLLECTION_NAME);
        assert_eq!(collection.collection_type, CollectionType::Persons);
        let ssn = &collection.properties[0];
        assert!(ssn.is_unique && !ssn.is_nullable);
        let phone = collection
            .properties
            .iter()
            .find(|p| p.name == "phone_number")
            .unwrap();
        assert!(phone.is_nullable);
    }

    #[test]
    fn mask_props_skips_the_zip_code() {
        let props = mask_props(&demo_collection());
        assert_eq!(props, vec!["ssn.mask", "email.mask", "phone_number.mask"]);
    }

    #[test]
    fn missing_field_yields_a_named_error() {
        let fields = ObjectFields::new();
        let err = field_str(&fields, "email").unwrap_err();
        assert!(err.to_string().contains("\"email\""));
    }
}
