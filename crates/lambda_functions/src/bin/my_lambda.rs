use lambda_functions::handlers::FunctionName;
use lambda_functions::runtime::run_function;
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    run_function(FunctionName::MyLambda).await
}
